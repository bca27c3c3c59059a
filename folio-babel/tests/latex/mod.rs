mod document;
mod errors;
