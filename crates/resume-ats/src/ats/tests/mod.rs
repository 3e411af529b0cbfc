mod common;
mod scoring;
mod tool;
