use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: InvoiceNumberSequence = InvoiceNumberSequence::new();

/// Gapless invoice number sequence generator.
///
/// Hands out `1, 2, 3, ...` with a single atomic increment per number, so
/// invoices created concurrently from several threads still receive unique,
/// strictly increasing numbers with no gaps.
///
/// [`Invoice::new`](super::Invoice::new) draws from the process-wide
/// [`global`](Self::global) sequence; embedders that need their own numbering
/// space pass a sequence to [`Invoice::with_sequence`](super::Invoice::with_sequence).
#[derive(Debug)]
pub struct InvoiceNumberSequence {
    next_number: AtomicU64,
}

impl InvoiceNumberSequence {
    /// Create a new sequence starting at 1.
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a sequence continuing from a given number.
    pub const fn starting_at(next_number: u64) -> Self {
        Self {
            next_number: AtomicU64::new(next_number),
        }
    }

    /// The process-wide sequence. Starts at 1 and is never reset.
    pub fn global() -> &'static InvoiceNumberSequence {
        &GLOBAL
    }

    /// Consume and return the next number.
    pub fn next_number(&self) -> u64 {
        self.next_number.fetch_add(1, Ordering::SeqCst)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> u64 {
        self.next_number.load(Ordering::SeqCst)
    }
}

impl Default for InvoiceNumberSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let seq = InvoiceNumberSequence::new();
        assert_eq!(seq.next_number(), 1);
        assert_eq!(seq.next_number(), 2);
        assert_eq!(seq.next_number(), 3);
    }

    #[test]
    fn peek_does_not_consume() {
        let seq = InvoiceNumberSequence::new();
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.next_number(), 1);
        assert_eq!(seq.peek(), 2);
    }

    #[test]
    fn starting_at() {
        let seq = InvoiceNumberSequence::starting_at(42);
        assert_eq!(seq.next_number(), 42);
        assert_eq!(seq.next_number(), 43);
    }

    #[test]
    fn concurrent_numbers_are_unique_and_gapless() {
        let seq = InvoiceNumberSequence::new();
        let mut numbers: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| (0..250).map(|_| seq.next_number()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=2000).collect::<Vec<_>>());
    }
}
