//! Client construction and single-request execution.
mod client;
mod executor;
mod headers;
mod query;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use client::build_client;
pub use executor::{PreparedRequest, classify_response, execute_request};
pub use headers::estimate_header_size;
pub use query::escape_url_query;
