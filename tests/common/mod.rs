//! Parse and print helpers shared by the integration tests and, through
//! `#[path]`, the crate's unit tests.
#![allow(dead_code)]

use swc_core::{
    common::{sync::Lrc, FileName, SourceMap, DUMMY_SP},
    ecma::{
        ast::*,
        codegen::{text_writer::JsWriter, Config as CodegenConfig, Emitter},
        parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax},
        visit::{VisitMut, VisitMutWith},
    },
};

thread_local! {
    static SOURCE_MAP: Lrc<SourceMap> = Default::default();
}

pub fn syntax() -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: true,
        decorators: true,
        decorators_before_export: true,
        ..Default::default()
    })
}

pub fn parse_module(code: &str) -> Module {
    SOURCE_MAP.with(|cm| {
        let fm = cm.new_source_file(
            Lrc::new(FileName::Custom("test.js".into())),
            code.to_string(),
        );
        let lexer = Lexer::new(syntax(), Default::default(), StringInput::from(&*fm), None);
        let mut parser = Parser::new_from(lexer);
        let module = parser.parse_module().expect("failed to parse module");
        assert!(parser.take_errors().is_empty());
        module
    })
}

/// Quote style is the only thing generated and parsed string literals differ in.
struct NormalizeStrings;

impl VisitMut for NormalizeStrings {
    fn visit_mut_str(&mut self, s: &mut Str) {
        s.raw = None;
        s.span = DUMMY_SP;
    }
}

pub fn print_module(module: &Module) -> String {
    let mut module = module.clone();
    module.visit_mut_with(&mut NormalizeStrings);

    SOURCE_MAP.with(|cm| {
        let mut buf = Vec::new();
        {
            let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);
            let mut emitter = Emitter {
                cfg: CodegenConfig::default(),
                comments: None,
                cm: cm.clone(),
                wr: writer,
            };
            emitter
                .emit_module(&module)
                .expect("failed to emit module");
        }
        String::from_utf8(buf).expect("module is not valid UTF-8")
    })
}

pub fn print_expr(expr: &Expr) -> String {
    let module = Module {
        span: DUMMY_SP,
        body: vec![ModuleItem::Stmt(Stmt::Expr(ExprStmt {
            span: DUMMY_SP,
            expr: Box::new(expr.clone()),
        }))],
        shebang: None,
    };
    let printed = print_module(&module);
    let printed = printed.trim();
    printed.strip_suffix(';').unwrap_or(printed).to_string()
}

pub fn first_class_mut(module: &mut Module) -> &mut Class {
    module
        .body
        .iter_mut()
        .find_map(|item| match item {
            ModuleItem::Stmt(Stmt::Decl(Decl::Class(decl)))
            | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl {
                decl: Decl::Class(decl),
                ..
            })) => Some(&mut *decl.class),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(ExportDefaultDecl {
                decl: DefaultDecl::Class(expr),
                ..
            })) => Some(&mut *expr.class),
            _ => None,
        })
        .expect("module has no class")
}

pub fn parse_script(code: &str) -> Program {
    SOURCE_MAP.with(|cm| {
        let fm = cm.new_source_file(
            Lrc::new(FileName::Custom("script.js".into())),
            code.to_string(),
        );
        let lexer = Lexer::new(syntax(), Default::default(), StringInput::from(&*fm), None);
        let mut parser = Parser::new_from(lexer);
        let script = parser.parse_script().expect("failed to parse script");
        assert!(parser.take_errors().is_empty());
        Program::Script(script)
    })
}

pub fn print_script(program: &Program) -> String {
    let Program::Script(script) = program else {
        panic!("expected a script");
    };
    let module = Module {
        span: script.span,
        body: script.body.iter().cloned().map(ModuleItem::Stmt).collect(),
        shebang: None,
    };
    print_module(&module)
}
