//! EBML writers for building synthetic documents in tests and benches.

/// Encode `value` as the shortest VINT that can hold it.
///
/// The all-ones pattern of each length is reserved for "unknown size", so
/// a value equal to it moves to the next length. Returns `None` for values
/// that do not fit in eight bytes.
pub fn encode_vint(value: u64) -> Option<Vec<u8>> {
    let len = (1..=8_u32).find(|&len| value < (1_u64 << (7 * len)) - 1)? as usize;
    let marked = value | (1_u64 << (7 * len));
    Some(marked.to_be_bytes()[8 - len..].to_vec())
}

/// Encode an element ID, dropping leading zero bytes.
pub fn encode_id(id: u32) -> Vec<u8> {
    let bytes = id.to_be_bytes();
    let skip = bytes.iter().take(3).take_while(|&&b| b == 0).count();
    bytes[skip..].to_vec()
}

/// Encode a complete element with the given payload.
///
/// # Panics
///
/// Panics if `payload` is 2^56 - 1 bytes or longer, which no VINT size can
/// describe.
pub fn element(id: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = encode_id(id);
    match encode_vint(payload.len() as u64) {
        Some(size) => out.extend(size),
        None => panic!("payload of {} bytes has no VINT size", payload.len()),
    }
    out.extend_from_slice(payload);
    out
}

/// Encode an unsigned-integer element using the fewest bytes (at least one).
pub fn uint_element(id: u32, value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take(7).take_while(|&&b| b == 0).count();
    element(id, &bytes[skip..])
}

/// Encode a string element.
pub fn string_element(id: u32, value: &str) -> Vec<u8> {
    element(id, value.as_bytes())
}

/// Encode a master element from already-encoded children.
pub fn master_element(id: u32, children: &[Vec<u8>]) -> Vec<u8> {
    element(id, &children.concat())
}
