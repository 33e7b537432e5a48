/// Retry primitives shared by proof submission campaigns.
///
/// - **Retry Strategy**: constant-interval ticks with no attempt cap
/// - **Cancellation**: cooperative, checked between ticks via [`CancellationToken`]
/// - **Adaptive Logging**: throttled warnings so long campaigns do not spam logs
///
/// # Example
///
/// ```rust,ignore
/// use pv_resilience::{CancellationToken, RetryConfig, RetryState};
///
/// let token = CancellationToken::new();
/// let mut retry_state = RetryState::new(RetryConfig::with_interval(interval));
///
/// loop {
///     match attempt().await {
///         Ok(result) => return Some(result),
///         Err(_) => {
///             retry_state.increment_retry();
///             if !retry_state.wait_next_tick(&token).await {
///                 return None;
///             }
///         }
///     }
/// }
/// ```
pub mod retry;

// Re-export main types for convenience
pub use retry::{RetryConfig, RetryState};
pub use tokio_util::sync::CancellationToken;
