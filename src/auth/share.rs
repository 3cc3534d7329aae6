/// Opaque capability string for the public record view. Distinct from the
/// user primary key so the QR link never exposes a database id, and wide
/// enough (256 bits) that guessing one is infeasible.
pub fn generate_share_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}
