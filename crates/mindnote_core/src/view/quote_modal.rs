//! Decorative random-quote modal.

use rand::Rng;

/// Quotes offered by the modal.
pub const QUOTES: &[&str] = &[
    "The unexamined life is not worth living. — Socrates",
    "Knowing yourself is the beginning of all wisdom. — Aristotle",
    "Well begun is half done. — Aristotle",
    "What we think, we become. — Buddha",
    "The faintest ink is more powerful than the strongest memory. — Chinese proverb",
    "Simplicity is the ultimate sophistication. — Leonardo da Vinci",
    "It is not that we have a short time to live, but that we waste a lot of it. — Seneca",
    "Fill your paper with the breathings of your heart. — William Wordsworth",
    "The secret of getting ahead is getting started. — Mark Twain",
    "We do not remember days, we remember moments. — Cesare Pavese",
];

/// Picks one quote uniformly at random.
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES[rng.gen_range(0..QUOTES.len())]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteModal {
    current: Option<usize>,
}

impl QuoteModal {
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&'static str> {
        self.current.map(|index| QUOTES[index])
    }

    /// Opens the modal with a fresh quote.
    pub fn open<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
        let index = rng.gen_range(0..QUOTES.len());
        self.current = Some(index);
        QUOTES[index]
    }

    /// Shows another quote, never repeating the one on screen.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
        let Some(current) = self.current else {
            return self.open(rng);
        };
        let mut index = rng.gen_range(0..QUOTES.len() - 1);
        if index >= current {
            index += 1;
        }
        self.current = Some(index);
        QUOTES[index]
    }

    pub fn close(&mut self) {
        self.current = None;
    }
}
