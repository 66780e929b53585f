/// 规约：可复用的查询谓词
///
/// 仓储的 `find_all`/`find_single` 以 `&dyn Specification<T>` 接收查询条件，
/// 例如“站点类型为 Blog”“标题等于 X”。
pub trait Specification<T>: Send + Sync {
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 两个条件同时满足
    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And(self, other)
    }
}

/// 以闭包表达的规约
pub struct Predicate<F>(pub F);

impl<T, F> Specification<T> for Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.0)(candidate)
    }
}

/// 见 [`Specification::and`]
pub struct And<A, B>(A, B);

impl<T, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) && self.1.is_satisfied_by(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_requires_both_sides() {
        let even = Predicate(|n: &i32| n % 2 == 0);
        let big = Predicate(|n: &i32| *n > 10);
        let spec = even.and(big);

        assert!(spec.is_satisfied_by(&12));
        assert!(!spec.is_satisfied_by(&8));
        assert!(!spec.is_satisfied_by(&11));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let spec = Predicate(|s: &String| s.starts_with('a'))
            .and(Predicate(|s: &String| s.len() == 3));
        let dyn_spec: &dyn Specification<String> = &spec;
        assert!(dyn_spec.is_satisfied_by(&"abc".to_string()));
        assert!(!dyn_spec.is_satisfied_by(&"abcd".to_string()));
    }
}
