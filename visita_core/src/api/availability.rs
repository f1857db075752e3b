use crate::slot::Slot;

/// A provider's open slots, soonest first.
pub type Resp = Vec<Slot>;

/// Where a provider's open slots live.
pub static PATH: &str = "/providers/:id/availability";

/// Make a path with the provider ID in the correct segment
pub fn make_path(provider_id: i64) -> String {
    PATH.replace(":id", &provider_id.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn puts_the_id_in_the_middle_segment() {
        assert_eq!(make_path(12), "/providers/12/availability");
    }
}
