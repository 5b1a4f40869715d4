use tracing::{debug, info};

use crate::errors::OmpsweepError;
use crate::invoke::Invoker;
use crate::types::{ConfigurationResult, SweepResult};

/// Run `repeat` invocations for every thread count, in the order given.
///
/// Invocations are strictly sequential: each child is awaited before the next
/// one starts. The first failing invocation aborts the whole sweep and no
/// partial result is returned. `on_progress` is called once per completed
/// configuration.
pub fn sweep<I, F>(
    invoker: &mut I,
    thread_counts: &[u32],
    repeat: usize,
    mut on_progress: F,
) -> Result<SweepResult, OmpsweepError>
where
    I: Invoker + ?Sized,
    F: FnMut(&ConfigurationResult),
{
    if thread_counts.is_empty() {
        return Err(OmpsweepError::InvalidPlan {
            detail: "no thread counts requested".to_string(),
        });
    }
    if repeat == 0 {
        return Err(OmpsweepError::InvalidPlan {
            detail: "repeat must be at least 1".to_string(),
        });
    }

    let mut results = Vec::with_capacity(thread_counts.len());

    for &threads in thread_counts {
        let mut samples = Vec::with_capacity(repeat);
        for rep in 0..repeat {
            debug!(threads, rep, "invocation");
            samples.push(invoker.invoke(threads)?);
        }

        let result = ConfigurationResult::from_samples(threads, samples).ok_or_else(|| {
            OmpsweepError::InvalidPlan {
                detail: format!("no samples collected for {} threads", threads),
            }
        })?;
        info!(threads, average = result.average, "configuration complete");
        on_progress(&result);
        results.push(result);
    }

    Ok(results)
}
