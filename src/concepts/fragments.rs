//! Frame reader: splits a character stream into fixed-size fragments and
//! OR-merges the concept vectors of each frame's letters.

use std::collections::VecDeque;
use std::io::BufRead;

use super::system::ConceptSystem;
use crate::bits::BitVec;
use crate::Result;

/// One frame of the stream: its characters and the merged concept vector.
///
/// The position key of character `i` within the frame is
/// `(i + initial_key) % positions`, so two readers over the same text with
/// different initial keys yield systematically shifted encodings. Frames
/// without letters carry an all-zero vector.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub chars: Vec<char>,
    pub vector: BitVec,
}

/// Lazily reads consecutive frames of `fragment_len` characters from any
/// [`BufRead`] source. I/O errors surface per item.
pub struct FragmentReader<'a, R> {
    system: &'a ConceptSystem,
    reader: R,
    fragment_len: usize,
    initial_key: u8,
    pending: VecDeque<char>,
    eof: bool,
}

impl<'a, R: BufRead> FragmentReader<'a, R> {
    pub fn new(system: &'a ConceptSystem, reader: R, fragment_len: usize, initial_key: u8) -> Self {
        assert!(fragment_len > 0, "fragment_len must be > 0");
        Self {
            system,
            reader,
            fragment_len,
            initial_key,
            pending: VecDeque::new(),
            eof: false,
        }
    }

    fn refill(&mut self) -> Result<()> {
        let mut line = String::new();
        while !self.eof && self.pending.len() < self.fragment_len {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                self.eof = true;
            } else {
                self.pending.extend(line.chars());
            }
        }
        Ok(())
    }

    fn merge(&self, chars: &[char]) -> BitVec {
        let mut vector = BitVec::zeros(self.system.vector_len());
        for (i, &ch) in chars.iter().enumerate() {
            let key = ((i + self.initial_key as usize) % self.system.positions() as usize) as u8;
            if let Some(concept) = self.system.vector(ch, key) {
                // Lengths always match: every concept is vector_len bits.
                vector
                    .or_with(concept)
                    .unwrap_or_else(|_| unreachable!("concept vectors share one length"));
            }
        }
        vector
    }
}

impl<R: BufRead> Iterator for FragmentReader<'_, R> {
    type Item = Result<Fragment>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(e) = self.refill() {
            return Some(Err(e));
        }
        if self.pending.is_empty() {
            return None;
        }

        let take = self.fragment_len.min(self.pending.len());
        let chars: Vec<char> = self.pending.drain(..take).collect();
        let vector = self.merge(&chars);
        Some(Ok(Fragment { chars, vector }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::RandomVectorBuilder;
    use std::io::Cursor;

    fn system() -> ConceptSystem {
        let mut builder = RandomVectorBuilder::with_seed(31);
        ConceptSystem::build(&mut builder, 5, 128, 6)
    }

    #[test]
    fn splits_into_consecutive_frames() {
        let sys = system();
        let reader = FragmentReader::new(&sys, Cursor::new("abcde fghij"), 5, 0);
        let frames: Vec<Fragment> = reader.map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].chars, vec!['a', 'b', 'c', 'd', 'e']);
        assert_eq!(frames[1].chars, vec![' ', 'f', 'g', 'h', 'i']);
        assert_eq!(frames[2].chars, vec!['j']);
    }

    #[test]
    fn frame_vector_is_or_of_letter_concepts() {
        let sys = system();
        let reader = FragmentReader::new(&sys, Cursor::new("ab"), 5, 0);
        let frame = reader.map(|f| f.unwrap()).next().unwrap();

        let mut expected = BitVec::zeros(128);
        expected.or_with(sys.vector('a', 0).unwrap()).unwrap();
        expected.or_with(sys.vector('b', 1).unwrap()).unwrap();
        assert_eq!(frame.vector, expected);
    }

    #[test]
    fn initial_key_shifts_position_keys() {
        let sys = system();
        let base: Vec<Fragment> = FragmentReader::new(&sys, Cursor::new("abc"), 5, 0)
            .map(|f| f.unwrap())
            .collect();
        let shifted: Vec<Fragment> = FragmentReader::new(&sys, Cursor::new("abc"), 5, 2)
            .map(|f| f.unwrap())
            .collect();

        let mut expected = BitVec::zeros(128);
        expected.or_with(sys.vector('a', 2).unwrap()).unwrap();
        expected.or_with(sys.vector('b', 3).unwrap()).unwrap();
        expected.or_with(sys.vector('c', 4).unwrap()).unwrap();
        assert_eq!(shifted[0].vector, expected);
        assert_ne!(base[0].vector, shifted[0].vector);
    }

    #[test]
    fn case_and_punctuation_handling() {
        let sys = system();
        let upper: Vec<Fragment> = FragmentReader::new(&sys, Cursor::new("AB!"), 5, 0)
            .map(|f| f.unwrap())
            .collect();
        let lower: Vec<Fragment> = FragmentReader::new(&sys, Cursor::new("ab!"), 5, 0)
            .map(|f| f.unwrap())
            .collect();
        assert_eq!(upper[0].vector, lower[0].vector);

        let silent: Vec<Fragment> = FragmentReader::new(&sys, Cursor::new("!?. "), 5, 0)
            .map(|f| f.unwrap())
            .collect();
        assert_eq!(silent[0].vector.popcount(), 0);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let sys = system();
        let mut reader = FragmentReader::new(&sys, Cursor::new(""), 5, 0);
        assert!(reader.next().is_none());
    }
}
