// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Progress monitors for the validation drivers.
//!
//! Progress output is operator visibility only; it never influences
//! pass/fail semantics, so a run driven by [`NoOpMonitor`] is
//! observationally identical apart from stdout.

/// Receives progress events from a run driver.
pub trait RunMonitor {
    /// Called at the start of each progress block with the number of
    /// trials completed so far (the first call reports `0`).
    fn on_progress(&mut self, trials_completed: u64);

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

impl std::fmt::Debug for dyn RunMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RunMonitor({})", self.name())
    }
}

/// Prints progress lines to stdout; used by the command-line binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutMonitor;

impl RunMonitor for StdoutMonitor {
    fn on_progress(&mut self, trials_completed: u64) {
        println!("Completed {} trials", trials_completed);
    }

    #[inline(always)]
    fn name(&self) -> &str {
        "StdoutMonitor"
    }
}

/// Discards all progress events; used by tests and shard workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl RunMonitor for NoOpMonitor {
    #[inline(always)]
    fn on_progress(&mut self, _trials_completed: u64) {}

    #[inline(always)]
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_names() {
        assert_eq!(StdoutMonitor.name(), "StdoutMonitor");
        assert_eq!(NoOpMonitor.name(), "NoOpMonitor");
    }
}
