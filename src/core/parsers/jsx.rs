use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::tree::SourceLocation;

/// A parsed source file together with the source map its spans point into.
pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

impl ParsedJSX {
    /// 1-indexed line and column of `pos`, labelled with `file_path`.
    pub fn location(&self, file_path: &str, pos: BytePos) -> SourceLocation {
        let loc = self.source_map.lookup_char_pos(pos);
        SourceLocation::new(file_path, loc.line, loc.col_display + 1)
    }
}

/// Parse TS/TSX/JS/JSX source into a module.
///
/// Every file gets its own `SourceMap`, so files can be parsed on any
/// rayon worker. For project files use `RouteContext::parsed_files()`.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJSX> {
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {}", file_path, e.kind().msg()))?;

        Ok(ParsedJSX { module, source_map })
    })
}
