#[cfg(test)]
mod tests {
    use fate::{
        all, any, deferred, every, first, inverted, rejected, resolved, wrap, Candidate, Promise,
        State, Tally, Then,
    };
    use futures::executor::block_on;

    fn wait(promise: Promise<Tally, Tally>) -> Result<Tally, Tally> {
        assert!(promise.state().is_settled());
        block_on(promise.settled())
    }

    #[test]
    fn test_all_and_every_agree_on_success() {
        let items = || vec![resolved::<i32, &str>(1), resolved(2)];
        assert_eq!(wait(all(items())), Ok(Tally::new(2, 2)));
        assert_eq!(wait(every(items())), Ok(Tally::new(2, 2)));
    }

    #[test]
    fn test_all_rejects_at_failing_index() {
        let result = wait(all(vec![resolved::<i32, &str>(1), rejected("x")]));
        assert_eq!(result, Err(Tally::new(1, 2)));
    }

    #[test]
    fn test_first_completion_wins() {
        let slow = deferred::<i32, &str>();
        let fast = deferred::<i32, &str>();
        let race = first(vec![slow.clone(), fast.clone()]);
        assert_eq!(race.state(), State::Pending);
        fast.resolve(2);
        slow.reject("late");
        assert_eq!(wait(race), Ok(Tally::new(1, 2)));
    }

    #[test]
    fn test_any_waits_for_exhaustion() {
        let a = deferred::<i32, &str>();
        let b = deferred::<i32, &str>();
        let either = any(vec![a.clone(), b.clone()]);
        a.reject("x");
        assert_eq!(either.state(), State::Pending);
        b.reject("y");
        assert_eq!(wait(either), Err(Tally::new(2, 2)));
    }

    #[test]
    fn test_mixed_candidates() {
        let pending = deferred::<i32, &str>();
        let items: Vec<Candidate<i32, &str>> = vec![
            Candidate::Value(1),
            wrap(pending.clone()).into(),
            Candidate::Promise(resolved(3).promise()),
        ];
        let joined = all(items);
        assert_eq!(joined.state(), State::Pending);
        pending.resolve(2);
        assert_eq!(wait(joined), Ok(Tally::new(3, 3)));
    }

    #[test]
    fn test_inverted_inputs() {
        let flipped = inverted(deferred::<i32, &str>());
        let joined = every(vec![flipped.clone()]);
        flipped.reject(5);
        assert_eq!(wait(joined), Ok(Tally::new(1, 1)));
    }

    #[test]
    fn test_vacuous_inputs() {
        let none = || Vec::<Candidate<i32, ()>>::new();
        assert_eq!(wait(all(none())), Ok(Tally::new(0, 0)));
        assert_eq!(wait(every(none())), Ok(Tally::new(0, 0)));
        assert_eq!(wait(first(none())), Ok(Tally::new(0, 0)));
        assert_eq!(wait(any(none())), Err(Tally::new(0, 0)));
    }
}
