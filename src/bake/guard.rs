//! The "all inputs present, or degrade" selection shared by every recipe.

/// `Some` with every value when all inputs are present, `None` otherwise.
pub fn all_present<T, const N: usize>(inputs: [Option<T>; N]) -> Option<[T; N]> {
    let values: Vec<T> = inputs.into_iter().collect::<Option<Vec<T>>>()?;
    values.try_into().ok()
}

/// Run `rich` iff every declared input is present, `degraded` otherwise.
///
/// Exactly one of the two closures runs. Both receive the shared context explicitly so they can
/// each borrow it mutably.
pub fn compose_guarded<C, T, R, const N: usize>(
    cx: &mut C,
    inputs: [Option<T>; N],
    rich: impl FnOnce(&mut C, [T; N]) -> R,
    degraded: impl FnOnce(&mut C) -> R,
) -> R {
    match all_present(inputs) {
        Some(values) => rich(cx, values),
        None => degraded(cx),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/guard.rs"]
mod tests;
