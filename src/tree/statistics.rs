use std::sync::atomic::{AtomicU32, Ordering};

/// Counters shared by every expansion task of one build.
///
/// Relaxed ordering is enough: the values are only read after the build has
/// joined all tasks, and that join already synchronizes with every writer.
#[derive(Debug, Default)]
pub struct Statistics {
    directories: AtomicU32,
    files: AtomicU32,
}

impl Statistics {
    pub fn record_directory(&self) {
        self.directories.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn directories(&self) -> u32 {
        self.directories.load(Ordering::Relaxed)
    }

    pub fn files(&self) -> u32 {
        self.files.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn counts_from_many_threads_without_losing_updates() {
        let stats = Arc::new(Statistics::default());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.record_directory();
                        stats.record_file();
                        stats.record_file();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("counter thread panicked");
        }

        assert_eq!(stats.directories(), 16_000);
        assert_eq!(stats.files(), 32_000);
    }
}
