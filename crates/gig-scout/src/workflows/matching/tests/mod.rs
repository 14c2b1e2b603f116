mod common;
mod ranking;
mod routing;
mod scoring;
