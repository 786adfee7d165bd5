//! Request templates, execution and the reqwest transport.
mod client;
mod executor;
mod template;


pub use client::{ReqwestTransport, build_client};
pub use executor::{
    Exchange, HttpTransport, PreparedRequest, RequestExecutor, ResponseInfo, classify,
};
pub use template::{RequestTemplate, render_template};
