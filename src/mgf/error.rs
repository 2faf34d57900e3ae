/// Errors that can occur while reading or writing MGF files
#[derive(Debug, thiserror::Error)]
pub enum MgfError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A numeric field or peak line could not be parsed
    #[error("Invalid number {value:?} on line {line}")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Offending text
        value: String,
    },

    /// End of input reached inside a `BEGIN IONS` block
    #[error("Block opened on line {line} is missing END IONS")]
    UnterminatedBlock {
        /// Line of the opening `BEGIN IONS`
        line: usize,
    },
}
