/// Turns any error into a `String` that carries a short context message,
/// which is the error type used throughout the UI layer.
pub trait ErrorStringExt<T> {
    fn err_to_string(self, msg: &str) -> Result<T, String>;
}

impl<T, E: std::fmt::Debug> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, msg: &str) -> Result<T, String> {
        self.map_err(|err| format!("{msg}: {err:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorStringExt;

    #[test]
    fn test_context_is_prepended() {
        let res: Result<u8, _> = "x".parse::<u8>();
        let err = res.err_to_string("could not parse").unwrap_err();
        assert!(err.starts_with("could not parse: "));
    }
}
