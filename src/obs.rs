//! Optional observability helpers for callback handling.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `orcid_bridge.callback` with the `strategy`
//!   (instance key) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `orcid_bridge_callback_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.

// self
use crate::_prelude::*;

/// Outcome labels recorded for each callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackOutcome {
	/// Entry into the callback handler.
	Attempt,
	/// Successful provisioning completion.
	Success,
	/// Failure propagated back to the host.
	Failure,
}
impl CallbackOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallbackOutcome::Attempt => "attempt",
			CallbackOutcome::Success => "success",
			CallbackOutcome::Failure => "failure",
		}
	}
}
impl Display for CallbackOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records a callback outcome via the global metrics recorder (when enabled).
pub fn record_callback_outcome(outcome: CallbackOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("orcid_bridge_callback_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCallback<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCallback<F> = F;

/// Span builder wrapped around callback handling.
#[derive(Clone, Debug)]
pub struct CallbackSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallbackSpan {
	/// Creates a new span tagged with the handling strategy key + stage.
	pub fn new(strategy: &str, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("orcid_bridge.callback", strategy, stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (strategy, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCallback<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
