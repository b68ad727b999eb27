//! Identifier and temporary password generation.
//!
//! The generators never look at existing records; callers must check the
//! result against the snapshot and draw again on collision.

use rand::Rng;
use rand::distributions::Alphanumeric;

pub const STUDENT_ID_PREFIX: &str = "STU";
pub const CLASS_ID_PREFIX: &str = "class";
pub const ID_SUFFIX_LEN: usize = 4;
pub const DEFAULT_PASSWORD_LEN: usize = 8;

const UPPER_ALNUM: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random suffix drawn from uppercase letters and digits.
fn upper_alnum_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| UPPER_ALNUM[rng.gen_range(0..UPPER_ALNUM.len())] as char)
        .collect()
}

/// Generate a student id of the form `STU_<roll>_<XXXX>`.
pub fn new_student_id<R: Rng + ?Sized>(rng: &mut R, roll_no: &str) -> String {
    format!(
        "{}_{}_{}",
        STUDENT_ID_PREFIX,
        roll_no,
        upper_alnum_suffix(rng, ID_SUFFIX_LEN)
    )
}

/// Generate a class id of the form `class_<unix-seconds>_<XXXX>`.
pub fn new_class_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}_{}_{}",
        CLASS_ID_PREFIX,
        chrono::Utc::now().timestamp(),
        upper_alnum_suffix(rng, ID_SUFFIX_LEN)
    )
}

/// Generate a temporary password drawn uniformly from `[A-Za-z0-9]`.
pub fn new_temporary_password<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}
