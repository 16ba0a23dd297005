//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain. Handlers translate
//! requests into service calls and domain results into shared DTOs; domain
//! errors become HTTP status codes here and nowhere else.

pub mod rest;
