mod operations;
mod support;
