//! Cache listing formatting

use rewards_db_types::CachedAddressInfo;
use serde::Serialize;

use super::{helpers::porcelain_field, traits::Formattable};

#[derive(Serialize)]
pub(crate) struct CacheListing<'a>(pub(crate) &'a [CachedAddressInfo]);

impl Formattable for CacheListing<'_> {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("cache.address_count", self.0.len())];
        for (i, info) in self.0.iter().enumerate() {
            output.push(porcelain_field(&format!("cache[{i}].address"), &info.address));
            output.push(porcelain_field(
                &format!("cache[{i}].block_count"),
                info.block_count,
            ));
            output.push(porcelain_field(
                &format!("cache[{i}].last_updated"),
                info.last_updated,
            ));
            output.push(porcelain_field(
                &format!("cache[{i}].size_in_bytes"),
                info.size_in_bytes,
            ));
        }
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rewards_primitives::Address;

    use super::*;
    use crate::{cli::OutputFormat, output::helpers::output_to};

    fn entries() -> Vec<CachedAddressInfo> {
        vec![CachedAddressInfo {
            address: Address::from_public_key(&[5u8; 32]),
            block_count: 3,
            last_updated: 1_718_000_000_000,
            size_in_bytes: 420,
        }]
    }

    #[test]
    fn test_cache_listing_porcelain_format() {
        let entries = entries();
        let mut buffer = Cursor::new(Vec::new());
        output_to(&CacheListing(&entries), OutputFormat::Porcelain, &mut buffer).unwrap();

        let output = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(output.contains("cache.address_count: 1"));
        assert!(output.contains("cache[0].block_count: 3"));
        assert!(output.contains("cache[0].last_updated: 1718000000000"));
        assert!(output.contains("cache[0].size_in_bytes: 420"));
    }

    #[test]
    fn test_cache_listing_json_is_array() {
        let entries = entries();
        let mut buffer = Cursor::new(Vec::new());
        output_to(&CacheListing(&entries), OutputFormat::Json, &mut buffer).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&buffer.into_inner()).unwrap();
        assert_eq!(json[0]["blockCount"], 3);
        assert_eq!(json[0]["sizeInBytes"], 420);
    }

    #[test]
    fn test_empty_listing() {
        let mut buffer = Cursor::new(Vec::new());
        output_to(&CacheListing(&[]), OutputFormat::Porcelain, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer.into_inner()).unwrap(),
            "cache.address_count: 0\n"
        );
    }
}
