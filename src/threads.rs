use crate::errors::OmpsweepError;

pub const DEFAULT_MIN_THREADS: u32 = 2;
pub const DEFAULT_MAX_THREADS: u32 = 20;
pub const DEFAULT_STEP_THREADS: u32 = 2;

/// Upper bound on how many configurations a range may expand to.
pub const MAX_RANGE_LEN: u64 = 10_000;

/// Parse a comma-separated thread list such as `"1,2,4, 8"`.
///
/// Order and duplicates are kept as given. Empty entries, non-integers and
/// zero are rejected.
pub fn parse_thread_list(input: &str) -> Result<Vec<u32>, OmpsweepError> {
    let invalid = |detail: String| OmpsweepError::InvalidThreadList {
        input: input.to_string(),
        detail,
    };

    let mut threads = Vec::new();
    for entry in input.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(invalid("empty entry".to_string()));
        }
        let n: u32 = entry
            .parse()
            .map_err(|_| invalid(format!("'{}' is not a thread count", entry)))?;
        if n == 0 {
            return Err(invalid("thread counts must be at least 1".to_string()));
        }
        threads.push(n);
    }
    Ok(threads)
}

/// Expand `min, min+step, ...` up to and including `max` when it lies on the
/// step grid. Values above `max` are never produced, and ranges longer than
/// [`MAX_RANGE_LEN`] are rejected before anything is allocated.
pub fn expand_range(min: u32, max: u32, step: u32) -> Result<Vec<u32>, OmpsweepError> {
    if step == 0 || min == 0 || min > max {
        return Err(OmpsweepError::InvalidRange { min, max, step });
    }
    let len = u64::from(max - min) / u64::from(step) + 1;
    if len > MAX_RANGE_LEN {
        return Err(OmpsweepError::InvalidRange { min, max, step });
    }

    let mut threads = Vec::with_capacity(len as usize);
    let mut current = min;
    while current <= max {
        threads.push(current);
        current = match current.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(threads)
}

/// Build the sweep order: an explicit list wins over the range parameters.
pub fn thread_plan(
    list: Option<&str>,
    min: u32,
    max: u32,
    step: u32,
) -> Result<Vec<u32>, OmpsweepError> {
    match list {
        Some(list) => parse_thread_list(list),
        None => expand_range(min, max, step),
    }
}
