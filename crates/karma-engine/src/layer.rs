//! The interception layer: a static table binding roll kinds to
//! interceptor chains.

use std::collections::HashMap;

use karma_core::RollKind;
use karma_dice::{EvaluateOptions, RollOutcome, RollRequest};

use crate::context::EngineContext;
use crate::dispatch::evaluate_roll;
use crate::error::EngineResult;
use crate::interceptor::{RollInterceptor, RollSource};

/// Owns the interceptors and routes each roll through the chains bound to
/// its kind.
///
/// The binding table is built once at startup; a kind with no bindings is a
/// pure passthrough, evaluated by the kernel with no hooks at all.
/// Interceptors run in registration order in both phases.
#[derive(Debug, Default)]
pub struct InterceptionLayer {
    interceptors: Vec<Box<dyn RollInterceptor>>,
    bindings: HashMap<RollKind, Vec<usize>>,
}

impl InterceptionLayer {
    /// Create a layer with no interceptors bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an interceptor and bind it to the given roll
    /// kinds. Binding the same interceptor to a kind twice is a no-op.
    pub fn register(
        &mut self,
        interceptor: Box<dyn RollInterceptor>,
        kinds: impl IntoIterator<Item = RollKind>,
    ) {
        self.interceptors.push(interceptor);
        let index = self.interceptors.len() - 1;
        for kind in kinds {
            let chain = self.bindings.entry(kind).or_default();
            if !chain.contains(&index) {
                chain.push(index);
            }
        }
    }

    /// Whether any interceptor is bound to this kind.
    pub fn is_bound(&self, kind: &RollKind) -> bool {
        self.bindings.get(kind).is_some_and(|c| !c.is_empty())
    }

    /// Run one roll: the before phase, the kernel evaluation, the after
    /// phase. The returned outcome reflects every merge and adjustment the
    /// bound interceptors made.
    pub fn roll(
        &mut self,
        ctx: &mut EngineContext<'_>,
        source: &RollSource,
        mut request: RollRequest,
        options: EvaluateOptions,
    ) -> EngineResult<RollOutcome> {
        let chain = self.bindings.get(&source.kind).cloned().unwrap_or_default();

        for &index in &chain {
            self.interceptors[index].before_roll(ctx, source, &mut request)?;
        }

        let mut outcome = evaluate_roll(ctx, &request, options)?;

        for &index in &chain {
            self.interceptors[index].after_evaluate(ctx, source, &mut outcome, options)?;
        }

        Ok(outcome)
    }

    /// Borrow a registered interceptor by concrete type.
    pub fn interceptor<T: RollInterceptor + 'static>(&self) -> Option<&T> {
        self.interceptors
            .iter()
            .find_map(|i| i.as_any().downcast_ref::<T>())
    }

    /// Mutably borrow a registered interceptor by concrete type.
    pub fn interceptor_mut<T: RollInterceptor + 'static>(&mut self) -> Option<&mut T> {
        self.interceptors
            .iter_mut()
            .find_map(|i| i.as_any_mut().downcast_mut::<T>())
    }
}
