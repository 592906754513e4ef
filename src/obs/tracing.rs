// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(op: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("storefront_client.op", op = op.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (op, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
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

/// Logs a failure at the point it was detected. Never includes tokens or passwords.
pub fn log_failure(op: Operation, endpoint: &str, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(
			op = op.as_str(),
			endpoint,
			status = err.status(),
			error = %err,
			"Storefront API call failed."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, endpoint, err);
	}
}

/// Logs the single replay that follows a 401.
pub fn log_unauthorized_retry(endpoint: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(endpoint, "API rejected the bearer token; re-authenticating once.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = endpoint;
	}
}

/// Logs that callers are being served the demo catalog instead of live data.
pub fn log_degraded(err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %err, "Catalog load failed; serving the demo catalog.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}
