pub mod ast;
pub mod lexer;
pub mod logger;
pub mod parser;

use wasm_bindgen::prelude::*;

use ast::Document;
use lexer::Scanner;
use logger::ParseLogger;
use parser::{ParseError, Parser};

/// Parse DBML source into a document.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    Parser::new(Scanner::new(input)).parse()
}

/// Parse DBML source, reporting milestones to `logger`.
pub fn parse_with_logger<L: ParseLogger>(input: &str, logger: L) -> Result<Document, ParseError> {
    Parser::with_logger(Scanner::new(input), logger).parse()
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Parse DBML source and return the document as JSON
#[wasm_bindgen(js_name = "dbmlToJson")]
pub fn dbml_to_json(source: &str) -> Result<String, String> {
    let doc = parse(source).map_err(|e| e.render(source))?;
    serde_json::to_string(&doc).map_err(|e| e.to_string())
}
