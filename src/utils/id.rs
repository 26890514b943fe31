use nanoid::nanoid;

/// Generate a 21-character URL-safe identifier.
pub fn longid() -> String {
    nanoid!()
}
