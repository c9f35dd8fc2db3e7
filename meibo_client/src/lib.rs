pub mod api;
pub mod details;
pub mod form;
pub mod page;

pub use api::{ClientError, CustomerApi};
pub use details::CustomerDetails;
pub use form::{CustomerForm, FormError};
pub use page::CustomerPage;
