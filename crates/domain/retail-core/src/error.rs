#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order id cannot be empty")]
    EmptyId,
    #[error("product '{title}' has an empty UPC")]
    EmptyUpc { title: String },
    #[error("UPC {upc} appears more than once in the order")]
    DuplicateUpc { upc: String },
}
