#![no_main]

use libfuzzer_sys::fuzz_target;
use serialscope::{metadata::typesystem::TypeRegistry, serialization::inspect_type};

fuzz_target!(|data: &[u8]| {
    if let Ok(registry) = TypeRegistry::from_mem(data.to_vec()) {
        for descriptor in &registry {
            let _ = inspect_type(&registry, descriptor);
        }
    }
});
