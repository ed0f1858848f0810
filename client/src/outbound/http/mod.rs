//! Roster service HTTP adapter.
//!
//! This module provides a thin reqwest implementation of the
//! `StudentGateway` port.

mod dto;
mod http_gateway;

pub use http_gateway::{
    DEFAULT_TOKEN_HEADER, HttpGatewayBuildError, HttpGatewayOptions, ReqwestStudentGateway,
};
