//! Lifecycle hooks and the chain sequencer.
//!
//! Hooks run at three scopes (map, resource, endpoint) around every dispatch.
//! Heterogeneous hook shapes (sync predicates, fallible closures, boxed
//! futures, hand-written trait impls) are normalized at the boundary into a
//! single async `Result<bool, HookError>` so the sequencing logic never
//! inspects what kind of hook it is running.
//!
//! The two chains are deliberately asymmetric: the before chain gates the
//! dispatch and short-circuits on the first veto, while the after chain is
//! purely observational. Every after hook is attempted exactly once and its
//! failure is logged, never propagated.
use std::{fmt, sync::Arc};

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::{core::request::Request, ports::transport::DispatchOutcome};

/// Normalized hook outcome: `Ok(true)` passes, `Ok(false)` vetoes with no
/// payload, `Err` vetoes with a payload.
pub type HookResult = Result<bool, HookError>;

/// Failure payload a hook can signal.
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct HookError {
    /// Human-readable reason the hook failed
    pub message: String,
    /// Optional structured payload attached by the hook
    pub detail: Option<serde_json::Value>,
}

impl HookError {
    /// Build a payload carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    /// Build a payload with an attached structured detail value.
    pub fn with_detail(message: impl Into<String>, detail: serde_json::Value) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail),
        }
    }
}

/// Which layer of the chain a hook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookScope {
    Global,
    Resource,
    Endpoint,
}

impl fmt::Display for HookScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookScope::Global => "global",
            HookScope::Resource => "resource",
            HookScope::Endpoint => "endpoint",
        })
    }
}

/// A before chain veto: which scope blocked the call and what it signaled.
#[derive(Debug, Error, Clone)]
#[error("request vetoed by {scope} before-request hook")]
pub struct HookVeto {
    /// The scope whose hook vetoed the call
    pub scope: HookScope,
    /// The payload the hook produced, if any
    pub reason: Option<HookError>,
}

/// Gating interceptor invoked with the built request before dispatch.
#[async_trait]
pub trait RequestHook: Send + Sync {
    /// Decide whether the request may proceed.
    async fn evaluate(&self, request: &Request) -> HookResult;
}

/// Observational interceptor invoked with the request and dispatch outcome.
#[async_trait]
pub trait ResponseHook: Send + Sync {
    /// Observe the outcome. The return value is recorded but never changes
    /// which branch the caller sees.
    async fn observe(&self, request: &Request, outcome: &DispatchOutcome) -> HookResult;
}

/// Cloneable handle to a before-request hook.
#[derive(Clone)]
pub struct BeforeHook(Arc<dyn RequestHook>);

impl BeforeHook {
    /// Wrap a hand-written [`RequestHook`] implementation.
    pub fn custom(hook: impl RequestHook + 'static) -> Self {
        Self(Arc::new(hook))
    }

    /// Wrap a synchronous predicate; `false` vetoes with no payload.
    pub fn sync<F>(predicate: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(SyncRequestHook(predicate)))
    }

    /// Wrap a synchronous closure that can veto with a payload.
    pub fn fallible<F>(func: F) -> Self
    where
        F: Fn(&Request) -> HookResult + Send + Sync + 'static,
    {
        Self(Arc::new(FallibleRequestHook(func)))
    }

    /// Wrap a closure producing a boxed future. The future must be `'static`;
    /// clone what you need out of the request before building it.
    pub fn deferred<F>(func: F) -> Self
    where
        F: Fn(&Request) -> BoxFuture<'static, HookResult> + Send + Sync + 'static,
    {
        Self(Arc::new(DeferredRequestHook(func)))
    }

    pub(crate) async fn evaluate(&self, request: &Request) -> HookResult {
        self.0.evaluate(request).await
    }
}

impl fmt::Debug for BeforeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BeforeHook")
    }
}

/// Cloneable handle to an after-response hook.
#[derive(Clone)]
pub struct AfterHook(Arc<dyn ResponseHook>);

impl AfterHook {
    /// Wrap a hand-written [`ResponseHook`] implementation.
    pub fn custom(hook: impl ResponseHook + 'static) -> Self {
        Self(Arc::new(hook))
    }

    /// Wrap a synchronous observer.
    pub fn sync<F>(observer: F) -> Self
    where
        F: Fn(&Request, &DispatchOutcome) + Send + Sync + 'static,
    {
        Self(Arc::new(SyncResponseHook(observer)))
    }

    /// Wrap a synchronous observer whose failure is recorded (and swallowed).
    pub fn fallible<F>(func: F) -> Self
    where
        F: Fn(&Request, &DispatchOutcome) -> HookResult + Send + Sync + 'static,
    {
        Self(Arc::new(FallibleResponseHook(func)))
    }

    /// Wrap a closure producing a boxed future; see [`BeforeHook::deferred`].
    pub fn deferred<F>(func: F) -> Self
    where
        F: Fn(&Request, &DispatchOutcome) -> BoxFuture<'static, HookResult> + Send + Sync + 'static,
    {
        Self(Arc::new(DeferredResponseHook(func)))
    }

    pub(crate) async fn observe(&self, request: &Request, outcome: &DispatchOutcome) -> HookResult {
        self.0.observe(request, outcome).await
    }
}

impl fmt::Debug for AfterHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AfterHook")
    }
}

struct SyncRequestHook<F>(F);

#[async_trait]
impl<F> RequestHook for SyncRequestHook<F>
where
    F: Fn(&Request) -> bool + Send + Sync,
{
    async fn evaluate(&self, request: &Request) -> HookResult {
        Ok((self.0)(request))
    }
}

struct FallibleRequestHook<F>(F);

#[async_trait]
impl<F> RequestHook for FallibleRequestHook<F>
where
    F: Fn(&Request) -> HookResult + Send + Sync,
{
    async fn evaluate(&self, request: &Request) -> HookResult {
        (self.0)(request)
    }
}

struct DeferredRequestHook<F>(F);

#[async_trait]
impl<F> RequestHook for DeferredRequestHook<F>
where
    F: Fn(&Request) -> BoxFuture<'static, HookResult> + Send + Sync,
{
    async fn evaluate(&self, request: &Request) -> HookResult {
        (self.0)(request).await
    }
}

struct SyncResponseHook<F>(F);

#[async_trait]
impl<F> ResponseHook for SyncResponseHook<F>
where
    F: Fn(&Request, &DispatchOutcome) + Send + Sync,
{
    async fn observe(&self, request: &Request, outcome: &DispatchOutcome) -> HookResult {
        (self.0)(request, outcome);
        Ok(true)
    }
}

struct FallibleResponseHook<F>(F);

#[async_trait]
impl<F> ResponseHook for FallibleResponseHook<F>
where
    F: Fn(&Request, &DispatchOutcome) -> HookResult + Send + Sync,
{
    async fn observe(&self, request: &Request, outcome: &DispatchOutcome) -> HookResult {
        (self.0)(request, outcome)
    }
}

struct DeferredResponseHook<F>(F);

#[async_trait]
impl<F> ResponseHook for DeferredResponseHook<F>
where
    F: Fn(&Request, &DispatchOutcome) -> BoxFuture<'static, HookResult> + Send + Sync,
{
    async fn observe(&self, request: &Request, outcome: &DispatchOutcome) -> HookResult {
        (self.0)(request, outcome).await
    }
}

/// Run the before chain in scope order, short-circuiting on the first veto.
/// An absent hook is an automatic pass.
pub(crate) async fn run_before_chain(
    chain: [(HookScope, Option<&BeforeHook>); 3],
    request: &Request,
) -> Result<(), HookVeto> {
    for (scope, hook) in chain {
        let Some(hook) = hook else { continue };
        match hook.evaluate(request).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(%scope, path = %request.full_path, "before-request hook vetoed the call");
                return Err(HookVeto {
                    scope,
                    reason: None,
                });
            }
            Err(err) => {
                tracing::debug!(%scope, path = %request.full_path, error = %err, "before-request hook failed");
                return Err(HookVeto {
                    scope,
                    reason: Some(err),
                });
            }
        }
    }
    Ok(())
}

/// Run the after chain in scope order. Every hook is attempted exactly once;
/// failures are logged and swallowed so the dispatch outcome stands.
pub(crate) async fn run_after_chain(
    chain: [(HookScope, Option<&AfterHook>); 3],
    request: &Request,
    outcome: &DispatchOutcome,
) {
    for (scope, hook) in chain {
        let Some(hook) = hook else { continue };
        if let Err(err) = hook.observe(request, outcome).await {
            tracing::warn!(%scope, path = %request.full_path, error = %err, "after-response hook failed (ignored)");
        }
    }
}
