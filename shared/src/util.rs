/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at shop scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// New order ID, e.g. `ORD-123456789`
pub fn order_id() -> String {
    format!("ORD-{}", snowflake_id())
}

/// New category ID, e.g. `cat-123456789`
pub fn category_id() -> String {
    format!("cat-{}", snowflake_id())
}

/// New product ID, e.g. `prod-123456789`
pub fn product_id() -> String {
    format!("prod-{}", snowflake_id())
}

/// New table ID, e.g. `table-123456789`
///
/// Seeded tables use `table-<number>` instead; see the table registry.
pub fn table_id() -> String {
    format!("table-{}", snowflake_id())
}
