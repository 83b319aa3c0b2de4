//! Renders a parsed program back into source-like text.
//!
//! Binary expressions are fully parenthesized so the output shows exactly how
//! the tree nested. Variable declarations print where they were made and
//! functions are placed back between the statements they were declared
//! among, so the text parses again to the same bindings.

use super::{
    ast::Node,
    program::Program,
    scope::FunctionId,
    statements::Block,
};

const INDENT: &str = "    ";

pub fn print_program(program: &Program) -> String {
    let mut printer = Printer {
        program,
        out: String::new(),
        indent: 0,
    };
    printer.block_body(program.top_level().body());
    printer.out
}

/// Renders a single expression or statement without a trailing newline.
pub fn print_node(program: &Program, node: &Node) -> String {
    let mut printer = Printer {
        program,
        out: String::new(),
        indent: 0,
    };
    printer.expression(node);
    printer.out
}

struct Printer<'a> {
    program: &'a Program,
    out: String,
    indent: usize,
}

impl Printer<'_> {
    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn block_body(&mut self, block: &Block) {
        let program = self.program;
        let mut functions = program
            .scopes()
            .scope(block.scope)
            .functions()
            .into_iter()
            .peekable();

        for node in block.iter() {
            let start = node.get_span().start;
            while let Some(id) =
                functions.next_if(|&id| program.function(id).span().start < start)
            {
                self.function(id);
            }
            self.statement(node);
        }

        for id in functions {
            self.function(id);
        }
    }

    fn braced(&mut self, block: &Block) {
        self.out.push_str("{\n");
        self.indent += 1;
        self.block_body(block);
        self.indent -= 1;
        self.pad();
        self.out.push('}');
    }

    fn function(&mut self, id: FunctionId) {
        let program = self.program;
        let function = program.function(id);
        let signature = function.signature();

        let params: Vec<String> = signature
            .iter()
            .map(|(ty, name)| format!("{} {}", ty, name))
            .collect();

        self.pad();
        self.out.push_str(&format!(
            "function {} {}({}) ",
            signature.return_type(),
            signature.name(),
            params.join(", ")
        ));

        match function.body().body.as_slice() {
            [Node::NativeCall(native)] => {
                self.out
                    .push_str(&format!("native {};\n", quote(&native.symbol)));
            }
            _ => {
                self.braced(function.body());
                self.out.push('\n');
            }
        }
    }

    fn statement(&mut self, node: &Node) {
        self.pad();
        match node {
            Node::Block(_) | Node::If(_) | Node::While(_) | Node::For(_) => self.compound(node),
            _ => {
                self.expression(node);
                self.out.push(';');
            }
        }
        self.out.push('\n');
    }

    fn compound(&mut self, node: &Node) {
        match node {
            Node::Block(block) => self.braced(block),
            Node::If(stmt) => {
                self.out.push_str("if (");
                self.expression(&stmt.condition);
                self.out.push_str(") ");
                self.braced(&stmt.then_body);
                if let Some(else_body) = &stmt.else_body {
                    self.out.push_str(" else ");
                    self.braced(else_body);
                }
            }
            Node::While(stmt) => {
                self.out.push_str("while (");
                self.expression(&stmt.condition);
                self.out.push_str(") ");
                self.braced(&stmt.body);
            }
            Node::For(stmt) => {
                let name = self.program.variable(stmt.variable).name();
                self.out.push_str(&format!("for ({} in ", name));
                self.expression(&stmt.range);
                self.out.push_str(") ");
                self.braced(&stmt.body);
            }
            _ => self.expression(node),
        }
    }

    fn arguments(&mut self, arguments: &[Node]) {
        for (index, argument) in arguments.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.expression(argument);
        }
    }

    fn expression(&mut self, node: &Node) {
        match node {
            Node::IntLit(lit) => self.out.push_str(&lit.value.to_string()),
            Node::DoubleLit(lit) => self.out.push_str(&format!("{:?}", lit.value)),
            Node::StringLit(lit) => self.out.push_str(&quote(&lit.value)),
            Node::Load(load) => {
                let program = self.program;
                let name = program.variable(load.variable).name();
                self.out.push_str(name);
            }
            Node::Store(store) => {
                let program = self.program;
                let variable = program.variable(store.variable());
                if store.declares() {
                    self.out.push_str(&format!("{} ", variable.get_type()));
                }
                self.out
                    .push_str(&format!("{} {} ", variable.name(), store.operator().text()));
                self.expression(store.value());
            }
            Node::Unary(unary) => {
                self.out.push_str(unary.operator().text());
                self.expression(unary.operand());
            }
            Node::Binary(binary) => {
                self.out.push('(');
                self.expression(binary.left());
                self.out
                    .push_str(&format!(" {} ", binary.operator().text()));
                self.expression(binary.right());
                self.out.push(')');
            }
            Node::Call(call) => {
                self.out.push_str(&call.name);
                self.out.push('(');
                self.arguments(&call.arguments);
                self.out.push(')');
            }
            Node::Print(print) => {
                self.out.push_str("print(");
                self.arguments(&print.arguments);
                self.out.push(')');
            }
            Node::NativeCall(native) => {
                self.out.push_str(&format!("native {}", quote(&native.symbol)));
            }
            Node::Return(ret) => {
                self.out.push_str("return");
                if let Some(value) = &ret.value {
                    self.out.push(' ');
                    self.expression(value);
                }
            }
            Node::Block(_) | Node::If(_) | Node::While(_) | Node::For(_) => self.compound(node),
        }
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::from("'");
    for ch in value.chars() {
        match ch {
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}
