use super::*;

#[test]
fn all_present_requires_every_input() {
    assert_eq!(all_present([Some(1), Some(2), Some(3)]), Some([1, 2, 3]));
    assert_eq!(all_present([Some(1), None, Some(3)]), None);
    assert_eq!(all_present::<u8, 0>([]), Some([]));
}

#[test]
fn exactly_one_branch_runs() {
    let mut log: Vec<&str> = Vec::new();
    let out = compose_guarded(
        &mut log,
        [Some("a"), Some("b")],
        |log, [a, b]| {
            log.push("rich");
            format!("{a}{b}")
        },
        |log| {
            log.push("degraded");
            String::new()
        },
    );
    assert_eq!(out, "ab");
    assert_eq!(log, ["rich"]);

    log.clear();
    let out = compose_guarded(
        &mut log,
        [Some("a"), None],
        |log, _| {
            log.push("rich");
            1
        },
        |log| {
            log.push("degraded");
            0
        },
    );
    assert_eq!(out, 0);
    assert_eq!(log, ["degraded"]);
}
