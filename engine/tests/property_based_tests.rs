use engine::brightness::{classify, luminance};
use engine::model::{Brightness, Catalog, CatalogEntry, Rgb, ThemeMetadata, ThemeResource};
use engine::parser::parse_hex_color;
use engine::selector::{Direction, select};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn entries(count: usize) -> Vec<CatalogEntry> {
    (0..count)
        .map(|i| CatalogEntry {
            resource: ThemeResource::new(format!("Packages/Test/Scheme{i:03}.tmTheme")),
            metadata: ThemeMetadata::default(),
            is_favorite: false,
        })
        .collect()
}

/// Catalog where `count` schemes from different packages share only
/// `names` distinct display names.
fn shared_name_entries(count: usize, names: usize) -> Vec<CatalogEntry> {
    let entries = (0..count)
        .map(|i| CatalogEntry {
            resource: ThemeResource::new(format!("Packages/Pkg{i:03}/Scheme{}.tmTheme", i % names)),
            metadata: ThemeMetadata::default(),
            is_favorite: false,
        })
        .collect();
    Catalog::from_entries(entries).into_entries()
}

#[cfg(test)]
mod selector_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_next_then_prev_returns_to_start(count in 1usize..40, start in 0usize..40) {
            let entries = entries(count);
            let start = start % count;
            let mut rng = StdRng::seed_from_u64(0);

            let next = select(&entries, Some(entries[start].id()), Direction::Next, &mut rng).unwrap();
            let back = select(&entries, Some(next.id()), Direction::Prev, &mut rng).unwrap();

            prop_assert_eq!(back.id(), entries[start].id());
        }

        #[test]
        fn test_n_steps_close_the_cycle(count in 1usize..30, start in 0usize..30) {
            let entries = entries(count);
            let start_id = entries[start % count].id().to_string();
            let mut rng = StdRng::seed_from_u64(0);

            let mut current = start_id.clone();
            for _ in 0..count {
                current = select(&entries, Some(&current), Direction::Next, &mut rng)
                    .unwrap()
                    .id()
                    .to_string();
            }

            prop_assert_eq!(current, start_id);
        }

        #[test]
        fn test_stale_selection_behaves_like_first_entry(count in 1usize..30, seed in any::<u64>()) {
            let entries = entries(count);
            let first = entries[0].id();

            for direction in [Direction::Next, Direction::Prev, Direction::Random] {
                let stale = select(
                    &entries,
                    Some("Packages/Gone/NoSuchScheme.tmTheme"),
                    direction,
                    &mut StdRng::seed_from_u64(seed),
                )
                .unwrap();
                let from_first =
                    select(&entries, Some(first), direction, &mut StdRng::seed_from_u64(seed)).unwrap();
                prop_assert_eq!(stale.id(), from_first.id());
            }
        }

        #[test]
        fn test_shared_names_still_close_the_cycle(count in 1usize..30, names in 1usize..5, start in 0usize..30) {
            let entries = shared_name_entries(count, names);
            let start_id = entries[start % count].id().to_string();
            let mut rng = StdRng::seed_from_u64(0);

            let mut current = start_id.clone();
            let mut visited = std::collections::HashSet::new();
            for _ in 0..count {
                current = select(&entries, Some(&current), Direction::Next, &mut rng)
                    .unwrap()
                    .id()
                    .to_string();
                visited.insert(current.clone());
            }

            prop_assert_eq!(current, start_id);
            prop_assert_eq!(visited.len(), count);
        }

        #[test]
        fn test_shared_names_next_then_prev_returns_to_start(count in 1usize..30, names in 1usize..5, start in 0usize..30) {
            let entries = shared_name_entries(count, names);
            let start = start % count;
            let mut rng = StdRng::seed_from_u64(0);

            let next = select(&entries, Some(entries[start].id()), Direction::Next, &mut rng).unwrap();
            let back = select(&entries, Some(next.id()), Direction::Prev, &mut rng).unwrap();

            prop_assert_eq!(back.id(), entries[start].id());
        }

        #[test]
        fn test_random_always_lands_in_catalog(count in 1usize..50, seed in any::<u64>()) {
            let entries = entries(count);
            let chosen = select(&entries, None, Direction::Random, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert!(entries.iter().any(|entry| entry.id() == chosen.id()));
        }
    }
}

#[cfg(test)]
mod color_property_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_shorthand_hex_doubles_each_digit(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
            let short = format!("#{r:x}{g:x}{b:x}");
            let long = format!("#{r:x}{r:x}{g:x}{g:x}{b:x}{b:x}");
            prop_assert_eq!(parse_hex_color(&short).unwrap(), parse_hex_color(&long).unwrap());
        }

        #[test]
        fn test_alpha_pair_is_ignored(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in any::<u8>()) {
            let with_alpha = format!("#{r:02X}{g:02X}{b:02X}{a:02X}");
            prop_assert_eq!(parse_hex_color(&with_alpha).unwrap(), Rgb::new(r, g, b));
        }

        #[test]
        fn test_classifier_boundary_is_light(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let rgb = Rgb::new(r, g, b);
            let lum = luminance(rgb);

            prop_assert_eq!(classify(rgb, lum), Brightness::Light);
            prop_assert_eq!(classify(rgb, lum + 0.001), Brightness::Dark);
        }
    }
}
