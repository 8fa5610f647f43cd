use rand::{seq::SliceRandom, Rng};

const MAILBOX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub const LOCAL_PART_LEN: usize = 8;
pub const PASSWORD_LEN: usize = 12;

/// Random string over `[a-z0-9]`.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| MAILBOX_CHARSET[rng.gen_range(0..MAILBOX_CHARSET.len())] as char)
        .collect()
}

/// Fresh `(address, password)` under one of `domains`, or `None` if there are
/// no domains to pick from.
pub fn random_credentials(domains: &[String]) -> Option<(String, String)> {
    let domain = domains.choose(&mut rand::thread_rng())?;
    let address = format!("{}@{domain}", random_string(LOCAL_PART_LEN));
    Some((address, random_string(PASSWORD_LEN)))
}
