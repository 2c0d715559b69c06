// | 43 bits: timestamp (ms since epoch) | 13 bits: node id | 8 bits: counter |

pub const TIMESTAMP_BITS: u8 = 43;
pub const NODE_ID_BITS: u8 = 13;
pub const COUNTER_BITS: u8 = 8;

pub const NODE_ID_SHIFT: u8 = COUNTER_BITS;
pub const TIMESTAMP_SHIFT: u8 = NODE_ID_BITS + COUNTER_BITS;

/// 2^43 - 1 ms, about 278 years.
pub const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;
/// Capacity of the node field.
pub const MAX_NODE_ID: u16 = (1 << NODE_ID_BITS) - 1;
/// Highest node id handed out by deployments today.
pub const MAX_ASSIGNABLE_NODE_ID: u16 = 1023;
/// Highest counter value issued within one millisecond (7 of the 8 bits).
pub const MAX_COUNTER: u8 = 127;

const NODE_ID_MASK: u64 = MAX_NODE_ID as u64;
const COUNTER_MASK: u64 = (1 << COUNTER_BITS) - 1;

/// Packs the three fields. Callers keep the timestamp within [`MAX_TIMESTAMP`].
#[inline]
pub const fn compose(timestamp: u64, node_id: u16, counter: u8) -> u64 {
    (timestamp << TIMESTAMP_SHIFT)
        | ((node_id as u64 & NODE_ID_MASK) << NODE_ID_SHIFT)
        | counter as u64
}

#[inline]
pub(crate) const fn timestamp_of(id: u64) -> u64 {
    id >> TIMESTAMP_SHIFT
}

#[cfg(test)]
#[inline]
pub(crate) const fn node_id_of(id: u64) -> u16 {
    ((id >> NODE_ID_SHIFT) & NODE_ID_MASK) as u16
}

#[inline]
pub(crate) const fn counter_of(id: u64) -> u8 {
    (id & COUNTER_MASK) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_fill_64_bits() {
        assert_eq!(TIMESTAMP_BITS + NODE_ID_BITS + COUNTER_BITS, 64);
        assert_eq!(TIMESTAMP_SHIFT, 21);
        assert_eq!(MAX_TIMESTAMP, 8_796_093_022_207);
        assert_eq!(MAX_NODE_ID, 8191);
    }

    #[test]
    fn test_compose_and_split() {
        let id = compose(1_700_000_000_123, 255, 42);

        assert_eq!(id >> 21, 1_700_000_000_123);
        assert_eq!((id >> 8) & 0x1FFF, 255);
        assert_eq!(id & 0xFF, 42);

        assert_eq!(timestamp_of(id), 1_700_000_000_123);
        assert_eq!(node_id_of(id), 255);
        assert_eq!(counter_of(id), 42);
    }

    #[test]
    fn test_fields_at_capacity_do_not_bleed() {
        let id = compose(MAX_TIMESTAMP, MAX_NODE_ID, u8::MAX);
        assert_eq!(id, u64::MAX);

        let node_only = compose(0, MAX_NODE_ID, 0);
        assert_eq!(timestamp_of(node_only), 0);
        assert_eq!(counter_of(node_only), 0);
        assert_eq!(node_id_of(node_only), MAX_NODE_ID);
    }
}
