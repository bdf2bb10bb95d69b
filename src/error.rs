/// Category of a [ZernikeError]
///
/// Type errors come from input that has the wrong shape (a fractional mode or size),
/// value errors from well-formed input that is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
}

#[derive(thiserror::Error, Debug)]
pub enum ZernikeError {
    #[error("mode should be an integer or a name, found {0:?}")]
    NotIntegral(String),
    #[error("mode should be a nonnegative integer, found {0}")]
    NegativeMode(i64),
    #[error(r#"invalid name "{0}" for the mode, try its index instead"#)]
    UnknownName(String),
    #[error("size should be an integer, found {0:?}")]
    SizeNotIntegral(String),
    #[error("size should be a nonnegative integer, found {0}")]
    NegativeSize(i64),
    #[error("selected mode {selected} bigger than {mode}")]
    SelectionExceedsMode { selected: usize, mode: usize },
    #[error("no Zernike polynomial found for mode(s) {0:?}")]
    NoPairs(Vec<usize>),
    #[error("(n={n}, l={l}) is not a Zernike pair, expected |l| <= n and n - |l| even")]
    InvalidPair { n: u32, l: i32 },
    #[error("invalid mode parser regex")]
    Regex(#[from] regex::Error),
}
impl ZernikeError {
    pub fn kind(&self) -> ErrorKind {
        use ZernikeError::*;
        match self {
            NotIntegral(_) | SizeNotIntegral(_) => ErrorKind::Type,
            NegativeMode(_)
            | UnknownName(_)
            | NegativeSize(_)
            | SelectionExceedsMode { .. }
            | NoPairs(_)
            | InvalidPair { .. }
            | Regex(_) => ErrorKind::Value,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZernikeError>;
