//! Packed-pixel text dataset format.
//!
//! The stream is whitespace-separated tokens:
//!
//! ```text
//! train_count test_count img_rows img_cols
//! <code> <label>     (train_count times)
//! <code>             (test_count times)
//! ```
//!
//! Every 3 characters of a code token encode two pixels in a base-41
//! positional scheme. With digits `d = c - '0'`:
//!
//! ```text
//! value = d0*41² + d1*41 + d2
//! ```
//!
//! The low byte and the high byte of `value` each map to one pixel,
//! normalized as `(byte - 128) / 255`. Test samples carry no inline label;
//! their labels come from a separate source.

use std::collections::VecDeque;
use std::io::BufRead;

use thiserror::Error;

/// Radix of the three-character pixel codes.
const BASE: u32 = 41;

/// Failure modes of the packed-pixel loader.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream ended before {expected} was read")]
    Truncated { expected: &'static str },

    #[error("invalid {what} token {token:?}")]
    InvalidNumber {
        what: &'static str,
        token: String,
    },

    #[error("sample {sample}: code is {got} characters, expected {expected}")]
    BadCodeLength {
        sample: usize,
        expected: usize,
        got: usize,
    },

    #[error("sample {sample}: code character {ch:?} is outside the base-41 digit range")]
    BadDigit { sample: usize, ch: char },

    #[error("sample {sample}: code value {value} does not fit two bytes")]
    CodeOutOfRange { sample: usize, value: u32 },
}

/// Decoded dataset: aligned training features and labels, plus unlabeled
/// held-out features of the same dimensionality.
#[derive(Debug, Clone)]
pub struct PackedDataset {
    pub img_rows: usize,
    pub img_cols: usize,
    pub train_images: Vec<Vec<f64>>,
    pub train_labels: Vec<usize>,
    pub test_images: Vec<Vec<f64>>,
}

/// Reads a full packed-pixel stream.
pub fn load_packed<R: BufRead>(reader: R) -> Result<PackedDataset, DataError> {
    let mut tokens = Tokens::new(reader);

    let train_count = tokens.next_number("train count")?;
    let test_count = tokens.next_number("test count")?;
    let img_rows = tokens.next_number("image rows")?;
    let img_cols = tokens.next_number("image cols")?;
    let area = img_rows * img_cols;

    let mut train_images = Vec::with_capacity(train_count);
    let mut train_labels = Vec::with_capacity(train_count);
    let mut test_images = Vec::with_capacity(test_count);

    for sample in 0..train_count + test_count {
        let code = tokens.next_token("sample code")?;
        let pixels = decode_code(&code, area, sample)?;
        if sample < train_count {
            train_images.push(pixels);
            train_labels.push(tokens.next_number("sample label")?);
        } else {
            test_images.push(pixels);
        }
    }

    Ok(PackedDataset {
        img_rows,
        img_cols,
        train_images,
        train_labels,
        test_images,
    })
}

/// Decodes one code token into `area` pixel values.
fn decode_code(code: &str, area: usize, sample: usize) -> Result<Vec<f64>, DataError> {
    let expected = 3 * (area / 2);
    if code.len() != expected {
        return Err(DataError::BadCodeLength {
            sample,
            expected,
            got: code.len(),
        });
    }

    let bytes = code.as_bytes();
    // An odd area leaves the final pixel at zero.
    let mut pixels = vec![0.0; area];
    for j in 0..area / 2 {
        let mut value: u32 = 0;
        for &b in &bytes[j * 3..j * 3 + 3] {
            let digit = i32::from(b) - i32::from(b'0');
            if digit < 0 || digit as u32 >= BASE {
                return Err(DataError::BadDigit {
                    sample,
                    ch: b as char,
                });
            }
            value = value * BASE + digit as u32;
        }
        if value > 0xFFFF {
            return Err(DataError::CodeOutOfRange { sample, value });
        }
        pixels[j * 2] = (f64::from(value & 0xFF) - 128.0) / 255.0;
        pixels[j * 2 + 1] = (f64::from(value >> 8) - 128.0) / 255.0;
    }
    Ok(pixels)
}

/// Whitespace tokenizer over a buffered reader; refills line by line.
struct Tokens<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Tokens {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<String, DataError> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Ok(tok);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(DataError::Truncated { expected });
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    fn next_number(&mut self, what: &'static str) -> Result<usize, DataError> {
        let tok = self.next_token(what)?;
        tok.parse()
            .map_err(|_| DataError::InvalidNumber { what, token: tok })
    }
}
