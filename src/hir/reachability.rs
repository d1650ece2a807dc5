//! Statements that can never execute.
//!
//! Every statement list (function, constructor and method bodies, arrow
//! block bodies, nested blocks, and the module's top level) gets one linear
//! pass with a past-terminator flag. Nested lists start fresh.

use super::config::AnalysisConfig;
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::base::ModuleId;
use crate::syntax::{ArrowBody, ClassMemberKind, Expr, ExprKind, ItemKind, SourceModule, Stmt, StmtKind};

/// Report every unreachable statement in a module.
pub fn analyze_module(module: ModuleId, source: &SourceModule, config: &AnalysisConfig) -> Vec<Diagnostic> {
    let mut analyzer = Reachability {
        diagnostics: DiagnosticCollector::new(module),
        exhaustive_branches: config.exhaustive_branches,
    };

    for item in &source.items {
        match &item.kind {
            ItemKind::Function(function) => {
                analyzer.stmts(&function.body);
            }
            ItemKind::Class(class) => {
                if let Some(constructor) = &class.constructor {
                    analyzer.stmts(&constructor.body);
                }
                for member in &class.members {
                    match &member.kind {
                        ClassMemberKind::Method(function) => {
                            analyzer.stmts(&function.body);
                        }
                        ClassMemberKind::Property { init: Some(init), .. } => analyzer.expr(init),
                        ClassMemberKind::Property { init: None, .. } => {}
                    }
                }
            }
            ItemKind::Constant(constant) => analyzer.expr(&constant.init),
            ItemKind::Interface(_) | ItemKind::TypeAlias(_) | ItemKind::Enum(_) => {}
        }
    }
    analyzer.stmts(&source.statements);

    let diagnostics = analyzer.diagnostics.finish();
    if !diagnostics.is_empty() {
        tracing::trace!("[REACHABILITY] {:?}: {} unreachable statements", module, diagnostics.len());
    }
    diagnostics
}

struct Reachability {
    diagnostics: DiagnosticCollector,
    exhaustive_branches: bool,
}

impl Reachability {
    /// Returns whether the list ends every path through it.
    fn stmts(&mut self, stmts: &[Stmt]) -> bool {
        let mut terminated = false;
        for stmt in stmts {
            if terminated {
                // Contents of an unreachable statement are not analyzed
                self.diagnostics.unreachable(stmt.span);
                continue;
            }
            terminated = self.stmt(stmt);
        }
        terminated
    }

    fn stmt(&mut self, stmt: &Stmt) -> bool {
        match &stmt.kind {
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.expr(value);
                }
                true
            }
            StmtKind::Throw(value) => {
                self.expr(value);
                true
            }
            StmtKind::Break | StmtKind::Continue => true,
            StmtKind::Expr(expr) => {
                self.expr(expr);
                false
            }
            StmtKind::Let { init, .. } => {
                if let Some(init) = init {
                    self.expr(init);
                }
                false
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                let then_ends = self.stmts(then_branch);
                let else_ends = else_branch.as_ref().is_some_and(|branch| self.stmts(branch));
                self.exhaustive_branches && then_ends && else_ends
            }
            StmtKind::Loop { head, body, .. } => {
                for expr in head {
                    self.expr(expr);
                }
                self.stmts(body);
                false
            }
            StmtKind::Try { body, catch, finally } => {
                let body_ends = self.stmts(body);
                let catch_ends = catch.as_ref().map(|clause| self.stmts(&clause.body));
                let finally_ends = finally.as_ref().is_some_and(|block| self.stmts(block));
                self.exhaustive_branches && (finally_ends || (body_ends && catch_ends.unwrap_or(true)))
            }
            StmtKind::Block(stmts) => {
                let ends = self.stmts(stmts);
                self.exhaustive_branches && ends
            }
        }
    }

    /// Find arrow block bodies inside an expression.
    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Arrow { body, .. } => match body {
                ArrowBody::Block(stmts) => {
                    self.stmts(stmts);
                }
                ArrowBody::Expr(value) => self.expr(value),
            },
            ExprKind::Ident(_) | ExprKind::This | ExprKind::Literal(_) => {}
            ExprKind::Template(parts) | ExprKind::Array(parts) => {
                for part in parts {
                    self.expr(part);
                }
            }
            ExprKind::Binary(lhs, rhs) => {
                self.expr(lhs);
                self.expr(rhs);
            }
            ExprKind::Call { callee, args } | ExprKind::New { callee, args } => {
                self.expr(callee);
                for arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::Member { object, .. } => self.expr(object),
            ExprKind::Object(fields) => {
                for field in fields {
                    self.expr(&field.value);
                }
            }
            ExprKind::Assign { target, value } => {
                self.expr(target);
                self.expr(value);
            }
        }
    }
}
