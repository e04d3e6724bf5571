#![forbid(unsafe_code)]

//! Terminal front end for the progressive Mandelbrot renderer.

pub mod app;
pub mod cli;
pub mod logging;
