mod properties;
mod streaming;
