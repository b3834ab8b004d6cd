// tests/image_rewrite_props.rs

use proptest::prelude::*;

use ecs_deploy::deploy::{parse_image_list, rewrite_images, ImageSpec};
use ecs_deploy_test_utils::builders::container;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn image_path() -> impl Strategy<Value = String> {
    (segment(), segment()).prop_map(|(org, name)| format!("{org}/{name}"))
}

fn tag() -> impl Strategy<Value = String> {
    "[0-9]{1,3}\\.[0-9]{1,3}"
}

proptest! {
    #[test]
    fn well_formed_entries_always_parse(
        entries in proptest::collection::vec((image_path(), tag()), 1..6)
    ) {
        let raw = entries
            .iter()
            .map(|(p, t)| format!("{p}:{t}"))
            .collect::<Vec<_>>()
            .join(",");
        let specs = parse_image_list(&raw).unwrap();
        prop_assert_eq!(specs.len(), entries.len());
        for (spec, (p, t)) in specs.iter().zip(&entries) {
            prop_assert_eq!(spec.path(), p.as_str());
            prop_assert_eq!(spec.tag(), t.as_str());
        }
    }

    #[test]
    fn non_matching_containers_are_untouched(
        images in proptest::collection::vec((image_path(), tag()), 1..6),
        spec_path in image_path(),
        spec_tag in tag(),
    ) {
        let mut defs: Vec<_> = images
            .iter()
            .enumerate()
            .map(|(i, (p, t))| container(&format!("c{i}"), &format!("{p}:{t}")))
            .collect();
        let before = defs.clone();
        let spec = ImageSpec::parse(&format!("{spec_path}:{spec_tag}")).unwrap();

        let rewrites = rewrite_images(&mut defs, std::slice::from_ref(&spec));

        let mut rewritten = 0;
        for (old, new) in before.iter().zip(&defs) {
            let old_image = old.image().unwrap();
            if old_image.contains(spec.path()) {
                rewritten += 1;
                let expected = spec.reference();
                prop_assert_eq!(new.image(), Some(expected.as_str()));
            } else {
                prop_assert_eq!(new, old);
            }
        }
        prop_assert_eq!(rewrites.len(), rewritten);
    }

    #[test]
    fn last_matching_spec_wins(
        path in image_path(),
        tags in proptest::collection::vec(tag(), 1..5),
    ) {
        let mut defs = vec![container("app", &format!("{path}:0.0"))];
        let raw = tags.iter().map(|t| format!("{path}:{t}")).collect::<Vec<_>>().join(",");
        let specs = parse_image_list(&raw).unwrap();

        rewrite_images(&mut defs, &specs);

        let expected = format!("{path}:{}", tags.last().unwrap());
        prop_assert_eq!(defs[0].image(), Some(expected.as_str()));
    }
}
