// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resource linearity analysis for the Flint language.
//!
//! This crate verifies, before execution, that every resource value is used
//! exactly once on every control-flow path:
//! - Use after move or destruction, including on some paths only
//! - Resource loss at scope exit, on reassignment, and of temporaries
//! - References only to storage slots, and only to resources

mod config;
mod error;
mod state;

pub use config::CheckerConfig;
pub use error::{ResourceError, ResourceErrorKind};
pub use state::{Availability, BindingId, Place, ResourceState};

use std::collections::HashMap;

use flint_ast::decl::{Decl, DeclKind, FunDecl, GlobalDecl};
use flint_ast::expr::{Expr, ExprKind};
use flint_ast::stmt::{Condition, Stmt, StmtKind};
use flint_ast::{NodeId, Span, Transfer};
use flint_types::{Resolution, Type, TypedProgram};

/// Result of resource analysis.
#[derive(Debug)]
pub struct ResourceCheckResult {
    /// Violations in the order they were found.
    pub errors: Vec<ResourceError>,
}

impl ResourceCheckResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run resource analysis over an elaborated program.
pub fn check_resources(program: &TypedProgram, decls: &[Decl], config: &CheckerConfig) -> ResourceCheckResult {
    ResourceChecker::new(program, config.clone()).check(decls)
}

/// A resource binding owned by the scope that declared it.
#[derive(Debug, Clone)]
struct Binding {
    id: BindingId,
    span: Span,
}

/// Exits out of the innermost loop body.
#[derive(Debug, Default)]
struct LoopFrame {
    /// Number of scopes outside the loop body.
    depth: usize,
    breaks: Vec<ResourceState>,
    continues: Vec<ResourceState>,
}

/// Resource linearity checker.
pub struct ResourceChecker<'a> {
    /// The typed program from elaboration.
    program: &'a TypedProgram,
    config: CheckerConfig,
    /// State of the path being checked.
    state: ResourceState,
    /// Availability of globals once every initializer has run. Each
    /// function starts from it.
    globals: ResourceState,
    /// Where each entity was last moved or destroyed.
    invalidations: HashMap<Place, Span>,
    /// Resource bindings per lexical scope, innermost last.
    scopes: Vec<Vec<Binding>>,
    /// Binding names, for messages.
    names: HashMap<BindingId, String>,
    loops: Vec<LoopFrame>,
    /// Globals may only be moved at program level.
    in_function: bool,
    /// Inside `init`, where fields of `self` are filled in.
    in_initializer: bool,
    /// Nonzero while iterating a loop to its fixed point.
    suppressed: usize,
    /// Errors accumulated during analysis.
    errors: Vec<ResourceError>,
}

impl<'a> ResourceChecker<'a> {
    pub fn new(program: &'a TypedProgram, config: CheckerConfig) -> Self {
        Self {
            program,
            config,
            state: ResourceState::new(),
            globals: ResourceState::new(),
            invalidations: HashMap::new(),
            scopes: Vec::new(),
            names: HashMap::new(),
            loops: Vec::new(),
            in_function: false,
            in_initializer: false,
            suppressed: 0,
            errors: Vec::new(),
        }
    }

    /// Run resource analysis on all declarations.
    pub fn check(mut self, decls: &[Decl]) -> ResourceCheckResult {
        // Globals are initialized in order before any function runs, and
        // are never subject to the scope-exit check.
        self.scopes.push(Vec::new());
        for decl in decls {
            if let DeclKind::Global(global) = &decl.kind {
                self.check_global(decl.id, global);
            }
        }
        self.scopes.clear();
        self.globals = std::mem::take(&mut self.state);

        for decl in decls {
            match &decl.kind {
                DeclKind::Fun(f) => self.check_fn(f, false),
                DeclKind::Composite(c) => {
                    if let Some(init) = &c.init {
                        self.check_fn(init, true);
                    }
                    for method in &c.methods {
                        self.check_fn(method, false);
                    }
                }
                DeclKind::Interface(_) | DeclKind::Global(_) => {}
            }
        }

        tracing::debug!(errors = self.errors.len(), "resource check finished");
        ResourceCheckResult { errors: self.errors }
    }

    fn check_global(&mut self, id: NodeId, global: &GlobalDecl) {
        let program = self.program;
        self.check_transfer(global.transfer, program.binding_type(id), &global.init);
        self.transfer_value(&global.init);
        self.declare(id, &global.name, global.name_span);
    }

    fn check_fn(&mut self, f: &FunDecl, is_init: bool) {
        let _span = tracing::debug_span!("check_resources", function = %f.name).entered();

        // Analysis is local to each function; globals keep the state the
        // initializers left them in.
        self.state = self.globals.clone();
        self.scopes = vec![Vec::new()];
        self.loops.clear();
        self.in_function = true;
        self.in_initializer = is_init;

        for param in &f.params {
            self.declare(param.id, &param.name, param.span);
        }
        self.check_stmts(&f.body);
        self.exit_scope();
    }

    // ------------------------------------------------------------------
    // Errors and bindings
    // ------------------------------------------------------------------

    fn report(&mut self, kind: ResourceErrorKind, span: Span) {
        self.push(ResourceError::new(kind, span));
    }

    fn report_on(&mut self, kind: ResourceErrorKind, expr: &Expr) {
        self.push(ResourceError::new(kind, expr.span).on(path_name(expr)));
    }

    fn push(&mut self, error: ResourceError) {
        if self.suppressed == 0 {
            self.errors.push(error);
        }
    }

    fn is_resource(&self, expr: &Expr) -> bool {
        self.program.is_resource_expr(expr.id)
    }

    fn describe(&self, place: &Place) -> String {
        let mut name = self
            .names
            .get(&place.root)
            .cloned()
            .unwrap_or_else(|| "value".to_string());
        for field in &place.fields {
            name.push('.');
            name.push_str(field);
        }
        name
    }

    /// Bring a binding into scope. Resource bindings start out available.
    fn declare(&mut self, id: BindingId, name: &str, span: Span) {
        self.names.insert(id, name.to_string());
        if !self.program.types.is_resource(self.program.binding_type(id)) {
            return;
        }
        let place = Place::root(id);
        self.state.clear_descendants(&place);
        self.state.set(place, Availability::Available);
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(Binding { id, span });
        }
    }

    fn enter_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Leave the innermost scope; its resources must have been used up.
    fn exit_scope(&mut self) {
        let Some(bindings) = self.scopes.pop() else { return };
        if self.state.is_reachable() {
            for binding in &bindings {
                self.check_lost(binding.id, binding.span);
            }
        }
        for binding in &bindings {
            self.state.remove_binding(binding.id);
        }
    }

    /// Check every resource declared in `scopes[depth..]` at an early exit.
    fn check_exits(&mut self, depth: usize, span: Span) {
        let ids: Vec<BindingId> = self
            .scopes
            .iter()
            .skip(depth)
            .flatten()
            .map(|b| b.id)
            .collect();
        for id in ids {
            self.check_lost(id, span);
        }
    }

    fn check_lost(&mut self, id: BindingId, span: Span) {
        let potentially = match self.state.own(&Place::root(id)) {
            Some(Availability::Available) => false,
            Some(Availability::MaybeAvailable) => true,
            _ => return,
        };
        let name = self.describe(&Place::root(id));
        self.report(
            ResourceErrorKind::ResourceLoss {
                name: Some(name),
                potentially,
            },
            span,
        );
    }

    /// The state to hand to a loop exit: bindings of the scopes being left
    /// are gone.
    fn state_without_scopes(&self, depth: usize) -> ResourceState {
        let mut state = self.state.clone();
        for binding in self.scopes.iter().skip(depth).flatten() {
            state.remove_binding(binding.id);
        }
        state
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn check_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            // Dead code after an exit is not analyzed.
            if !self.state.is_reachable() {
                break;
            }
            self.check_stmt(stmt);
        }
    }

    fn check_block(&mut self, stmts: &[Stmt]) {
        self.enter_scope();
        self.check_stmts(stmts);
        self.exit_scope();
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        let program = self.program;
        match &stmt.kind {
            StmtKind::Expr(expr) => self.check_expr_stmt(expr),
            StmtKind::Let {
                name,
                name_span,
                transfer,
                init,
                ..
            } => {
                self.check_transfer(*transfer, program.binding_type(stmt.id), init);
                self.transfer_value(init);
                self.declare(stmt.id, name, *name_span);
            }
            StmtKind::Assign {
                target,
                transfer,
                value,
            } => {
                self.check_transfer(*transfer, program.type_of(target.id), value);
                self.transfer_value(value);
                self.assign(target, value);
            }
            StmtKind::Swap { left, right } => {
                self.swap_side(left);
                self.swap_side(right);
            }
            StmtKind::Destroy(expr) => self.consume(expr),
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.consume_operand(value);
                }
                self.check_exits(0, stmt.span);
                self.state.mark_unreachable();
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.check_if(stmt, cond, then_branch, else_branch.as_deref()),
            StmtKind::While { cond, body } => self.check_while(cond, body),
            StmtKind::Break | StmtKind::Continue => {
                let Some(depth) = self.loops.last().map(|frame| frame.depth) else {
                    return;
                };
                self.check_exits(depth, stmt.span);
                let exit = self.state_without_scopes(depth);
                if let Some(frame) = self.loops.last_mut() {
                    if matches!(stmt.kind, StmtKind::Break) {
                        frame.breaks.push(exit);
                    } else {
                        frame.continues.push(exit);
                    }
                }
                self.state.mark_unreachable();
            }
        }
    }

    /// A resource-valued expression statement drops its value.
    fn check_expr_stmt(&mut self, expr: &Expr) {
        if !self.is_resource(expr) {
            self.read(expr);
            return;
        }
        let inner = expr.strip_move();
        if let Some(place) = self.owned_place(inner) {
            let name = self.describe(&place);
            self.consume(expr);
            self.report(
                ResourceErrorKind::ResourceLoss {
                    name: Some(name),
                    potentially: false,
                },
                expr.span,
            );
        } else if inner.is_place() {
            self.read(inner);
            self.report(
                ResourceErrorKind::ResourceLoss {
                    name: None,
                    potentially: false,
                },
                expr.span,
            );
        } else {
            // Temporaries are reported as lost by `read`.
            self.read(expr);
        }
    }

    /// `=` copies and `<-` moves; the operator must match the value.
    fn check_transfer(&mut self, transfer: Transfer, slot: &Type, value: &Expr) {
        let resource = self.program.types.is_resource(slot) || self.is_resource(value);
        match (resource, transfer) {
            (true, Transfer::Copy) => self.report_on(ResourceErrorKind::MissingMoveOperation, value),
            (false, Transfer::Move) => self.report_on(ResourceErrorKind::IncorrectTransferOperation, value),
            _ => {}
        }
    }

    fn assign(&mut self, target: &Expr, value: &Expr) {
        if !self.is_resource(target) && !self.is_resource(value) {
            self.read_target(target);
            return;
        }

        if let Some(place) = self.owned_place(target) {
            if let ExprKind::Field { object, .. } = &target.kind {
                self.read(object);
            }
            let before = self.state.get(&place);
            if before != Availability::Unavailable {
                let name = self.describe(&place);
                self.report(
                    ResourceErrorKind::ResourceLoss {
                        name: Some(name),
                        potentially: before == Availability::MaybeAvailable,
                    },
                    target.span,
                );
            }
            self.state.clear_descendants(&place);
            self.state.set(place, Availability::Available);
            return;
        }

        self.read_target(target);
        let initializing = self.in_initializer
            && matches!(&target.kind, ExprKind::Field { object, .. } if matches!(object.kind, ExprKind::SelfRef));
        if !initializing {
            // Storage, array, reference and field slots are always occupied.
            self.report(
                ResourceErrorKind::ResourceLoss {
                    name: None,
                    potentially: false,
                },
                target.span,
            );
        }
    }

    /// Evaluate the operands of an assignment target without reading the
    /// slot itself.
    fn read_target(&mut self, target: &Expr) {
        match &target.kind {
            ExprKind::Field { object, .. } => self.read(object),
            ExprKind::Index { object, index } => {
                self.read(object);
                self.read(index);
            }
            _ => {}
        }
    }

    /// Swapping never invalidates: both sides hold a value afterwards.
    fn swap_side(&mut self, side: &Expr) {
        self.read(side);
        if !self.is_resource(side) {
            return;
        }
        if let Some(place) = self.owned_place(side) {
            self.state.clear_descendants(&place);
            self.state.set(place, Availability::Available);
        }
    }

    fn check_if(&mut self, stmt: &Stmt, cond: &Condition, then_branch: &[Stmt], else_branch: Option<&[Stmt]>) {
        let program = self.program;
        match cond {
            Condition::Expr(expr) => {
                self.read(expr);
                let entry = self.state.clone();
                self.check_block(then_branch);
                self.join_else(entry, else_branch);
            }
            Condition::Let {
                name,
                name_span,
                transfer,
                value,
                ..
            } => {
                self.check_transfer(*transfer, program.type_of(value.id), value);
                self.transfer_value(value);
                let entry = self.state.clone();
                self.enter_scope();
                self.declare(stmt.id, name, *name_span);
                self.check_stmts(then_branch);
                self.exit_scope();
                self.join_else(entry, else_branch);
            }
        }
    }

    /// Check the else branch from `entry` and merge it with the state the
    /// then branch left behind.
    fn join_else(&mut self, entry: ResourceState, else_branch: Option<&[Stmt]>) {
        let then_state = std::mem::replace(&mut self.state, entry);
        if let Some(else_branch) = else_branch {
            self.check_block(else_branch);
        }
        self.state = then_state.merge(&self.state);
        tracing::trace!(reachable = self.state.is_reachable(), "merged branch states");
    }

    fn check_while(&mut self, cond: &Expr, body: &[Stmt]) {
        let entry = self.state.clone();
        let mut head = entry.clone();
        let mut stable = false;

        // Iterate to the loop-head fixed point without reporting. Every write
        // to the state is a constant and paths only meet in joins, so the
        // head only climbs the lattice and settles within a few passes.
        self.suppressed += 1;
        for iteration in 0..self.config.max_loop_iterations.max(1) {
            self.state = head.clone();
            self.read(cond);
            let (back_edge, _) = self.check_loop_body(body);
            let next = entry.merge(&back_edge);
            if next == head {
                tracing::trace!(iteration, "loop state stable");
                stable = true;
                break;
            }
            head = next;
        }
        self.suppressed -= 1;

        if !stable {
            tracing::debug!(
                limit = self.config.max_loop_iterations,
                "loop state not stable, widening"
            );
            head.widen();
        }

        // One reporting pass from the loop head.
        self.state = head;
        self.read(cond);
        let mut exit = self.state.clone();
        let (_, breaks) = self.check_loop_body(body);
        for state in &breaks {
            exit = exit.merge(state);
        }
        self.state = exit;
    }

    /// Check one iteration. Returns the back-edge state and the states at
    /// each `break`.
    fn check_loop_body(&mut self, body: &[Stmt]) -> (ResourceState, Vec<ResourceState>) {
        self.loops.push(LoopFrame {
            depth: self.scopes.len(),
            ..LoopFrame::default()
        });
        self.check_block(body);
        let Some(frame) = self.loops.pop() else {
            return (self.state.clone(), Vec::new());
        };
        let mut back_edge = self.state.clone();
        for state in &frame.continues {
            back_edge = back_edge.merge(state);
        }
        (back_edge, frame.breaks)
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// The entity an expression may move: a local binding or a field chain
    /// owned by one. Globals are owned only at program level. Fields of
    /// `self`, references and containers are never owned.
    fn owned_place(&self, expr: &Expr) -> Option<Place> {
        self.place_of(expr, !self.in_function)
    }

    /// The entity whose availability a read depends on, globals included.
    fn tracked_place(&self, expr: &Expr) -> Option<Place> {
        self.place_of(expr, true)
    }

    fn place_of(&self, expr: &Expr, globals: bool) -> Option<Place> {
        match &expr.kind {
            ExprKind::Ident(_) => match self.program.resolutions.get(&expr.id)? {
                Resolution::Local(id) => Some(Place::root(*id)),
                Resolution::Global(name) if globals => self.program.globals.get(name).map(|g| Place::root(g.id)),
                _ => None,
            },
            ExprKind::Field { object, field } => match self.program.type_of(object.id) {
                Type::Composite(_) => self.place_of(object, globals).map(|p| p.field(field)),
                _ => None,
            },
            _ => None,
        }
    }

    fn require_available(&mut self, place: &Place, span: Span) {
        let potentially = match self.state.own(place) {
            Some(Availability::Unavailable) => false,
            Some(Availability::MaybeAvailable) => true,
            _ => return,
        };
        let name = self.describe(place);
        let moved_at = self.invalidated_at(place);
        self.push(
            ResourceError::new(ResourceErrorKind::UseOfInvalidatedResource { name, potentially }, span)
                .invalidated_at(moved_at),
        );
    }

    /// Where the entity, or the nearest enclosing one, was last moved.
    fn invalidated_at(&self, place: &Place) -> Option<Span> {
        let mut current = Some(place.clone());
        while let Some(p) = current {
            if let Some(span) = self.invalidations.get(&p) {
                return Some(*span);
            }
            current = p.parent();
        }
        None
    }

    /// Mark an entity as moved. It and every tracked field of it must still
    /// hold their values.
    fn invalidate(&mut self, place: Place, span: Span) {
        self.require_available(&place, span);
        for (field, availability) in self.state.descendants(&place) {
            if availability != Availability::Available {
                let name = self.describe(&field);
                let moved_at = self.invalidated_at(&field);
                self.push(
                    ResourceError::new(
                        ResourceErrorKind::UseOfInvalidatedResource {
                            name,
                            potentially: availability == Availability::MaybeAvailable,
                        },
                        span,
                    )
                    .invalidated_at(moved_at),
                );
            }
        }
        tracing::trace!(entity = %self.describe(&place), "resource invalidated");
        self.invalidations.insert(place.clone(), span);
        self.state.clear_descendants(&place);
        self.state.set(place, Availability::Unavailable);
    }

    /// A value handed over by argument, array element or `return`. Resources
    /// must be marked with `<-`, and nothing else may be.
    fn consume_operand(&mut self, operand: &Expr) {
        match (self.is_resource(operand), operand.is_move()) {
            (true, false) => self.report_on(ResourceErrorKind::MissingMoveOperation, operand),
            (false, true) => self.report(ResourceErrorKind::InvalidMoveOperation, operand.span),
            _ => {}
        }
        self.transfer_value(operand);
    }

    fn transfer_value(&mut self, expr: &Expr) {
        if self.is_resource(expr) {
            self.consume(expr);
        } else {
            self.read(expr);
        }
    }

    /// Move a resource out of the expression.
    fn consume(&mut self, expr: &Expr) {
        let inner = expr.strip_move();
        if !self.is_resource(inner) {
            self.read(inner);
            return;
        }
        match &inner.kind {
            ExprKind::Ident(_) => match self.owned_place(inner) {
                Some(place) => self.invalidate(place, inner.span),
                None => {
                    let global = matches!(self.program.resolutions.get(&inner.id), Some(Resolution::Global(_)));
                    if global {
                        self.report_on(ResourceErrorKind::InvalidNestedResourceMove, inner);
                    }
                }
            },
            ExprKind::Field { object, .. } => {
                self.read(object);
                match self.owned_place(inner) {
                    Some(place) => self.invalidate(place, inner.span),
                    None => self.report_on(ResourceErrorKind::InvalidNestedResourceMove, inner),
                }
            }
            ExprKind::SelfRef | ExprKind::Index { .. } | ExprKind::StorageIndex(_) => {
                self.read(inner);
                self.report_on(ResourceErrorKind::InvalidNestedResourceMove, inner);
            }
            ExprKind::Cast { expr, .. } => self.consume(expr),
            _ => self.visit_value(inner),
        }
    }

    /// Observe a value without moving it.
    fn read(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Ident(_) => {
                if let Some(place) = self.tracked_place(expr) {
                    self.require_available(&place, expr.span);
                }
            }
            ExprKind::Field { object, .. } => {
                self.read(object);
                if let Some(place) = self.tracked_place(expr) {
                    self.require_available(&place, expr.span);
                }
            }
            ExprKind::Index { object, index } => {
                self.read(object);
                self.read(index);
            }
            ExprKind::Int(_)
            | ExprKind::Bool(_)
            | ExprKind::String(_)
            | ExprKind::Nil
            | ExprKind::SelfRef
            | ExprKind::StorageIndex(_) => {}
            ExprKind::Move(inner) => self.consume(inner),
            ExprKind::Cast { expr: inner, .. } => self.read(inner),
            ExprKind::Reference { expr: inner, .. } => self.check_reference(expr, inner),
            _ => {
                self.visit_value(expr);
                if self.is_resource(expr) {
                    // A temporary that nothing takes ownership of.
                    self.report(
                        ResourceErrorKind::ResourceLoss {
                            name: None,
                            potentially: false,
                        },
                        expr.span,
                    );
                }
            }
        }
    }

    /// Evaluate the operands of an expression that produces a new value.
    fn visit_value(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Create { args, .. } | ExprKind::Call { args, .. } => {
                for arg in args {
                    self.consume_operand(arg);
                }
            }
            ExprKind::MethodCall { object, args, .. } => {
                self.read(object);
                let receiver = self.tracked_place(object);
                let held = receiver.as_ref().map(|place| self.state.get(place));
                for arg in args {
                    self.consume_operand(arg);
                }
                // The receiver is held for the whole call; no argument may
                // move it.
                if let Some(place) = receiver {
                    let after = self.state.get(&place);
                    if held == Some(Availability::Available) && after != Availability::Available {
                        let name = self.describe(&place);
                        let moved_at = self.invalidated_at(&place);
                        self.push(
                            ResourceError::new(
                                ResourceErrorKind::UseOfInvalidatedResource {
                                    name,
                                    potentially: after == Availability::MaybeAvailable,
                                },
                                object.span,
                            )
                            .invalidated_at(moved_at),
                        );
                    }
                }
            }
            ExprKind::Array(elements) => {
                for element in elements {
                    self.consume_operand(element);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.read(left);
                self.read(right);
            }
            ExprKind::Unary { operand, .. } => self.read(operand),
            _ => {}
        }
    }

    /// `&e as T`: `e` must be a storage slot holding a resource that is a
    /// subtype of the resource type `T`. References never change the state.
    fn check_reference(&mut self, reference: &Expr, referenced: &Expr) {
        let ExprKind::StorageIndex(_) = referenced.kind else {
            self.read(referenced);
            self.report_on(ResourceErrorKind::InvalidResourceReference, referenced);
            return;
        };

        let program = self.program;
        let types = &program.types;
        let Some(slot) = program.type_of(referenced.id).unwrap_optional().cloned() else {
            return;
        };
        let target = match program.type_of(reference.id) {
            Type::Reference(target) => (**target).clone(),
            _ => return,
        };
        let target_span = match &reference.kind {
            ExprKind::Reference { ty, .. } => ty.span,
            _ => reference.span,
        };

        let mut found = Vec::new();
        if !types.is_resource(&slot) {
            found.push((
                ResourceErrorKind::NonResourceReference { ty: types.display(&slot) },
                referenced.span,
            ));
        }
        if !types.is_resource(&target) {
            found.push((
                ResourceErrorKind::NonResourceReference { ty: types.display(&target) },
                target_span,
            ));
        }
        if !types.is_subtype(&slot, &target) {
            found.push((
                ResourceErrorKind::TypeMismatch {
                    expected: types.display(&target),
                    found: types.display(&slot),
                },
                reference.span,
            ));
        }
        for (kind, span) in found {
            self.report(kind, span);
        }
    }
}

/// Source-level name of a place expression: `r`, `self.items`, `h.inner`.
fn path_name(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::Ident(name) => Some(name.clone()),
        ExprKind::SelfRef => Some("self".to_string()),
        ExprKind::Field { object, field } => Some(format!("{}.{}", path_name(object)?, field)),
        ExprKind::Move(inner) => path_name(inner),
        _ => None,
    }
}
