//! Property tests for the tenant query engine

use std::collections::{BTreeMap, BTreeSet};

use identx_core::queries::LikePattern;
use identx_core::{IdentityError, IdentityService, InMemoryTenantStore, Tenant};
use proptest::prelude::*;

fn tenant_map() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
    prop::collection::btree_map("[a-z]{1,6}", prop::option::of("[A-Za-z %]{1,8}"), 0..12)
}

fn service_with(tenants: &BTreeMap<String, Option<String>>) -> IdentityService<InMemoryTenantStore> {
    let service = IdentityService::new(InMemoryTenantStore::new());
    for (id, name) in tenants {
        let mut tenant = Tenant::new(id.clone());
        if let Some(name) = name {
            tenant.set_name(name.clone());
        }
        service.save_tenant(&tenant).unwrap();
    }
    service
}

proptest! {
    #[test]
    fn prop_every_stored_id_is_found_once(tenants in tenant_map()) {
        let service = service_with(&tenants);
        for id in tenants.keys() {
            let mut query = service.create_tenant_query();
            query.tenant_id(id.clone()).unwrap();

            prop_assert_eq!(query.count().unwrap(), 1);
            let found = query.single_result().unwrap().unwrap();
            prop_assert_eq!(found.id(), id.as_str());
        }
    }

    #[test]
    fn prop_unknown_id_counts_zero(tenants in tenant_map(), probe in "[A-Z0-9]{1,6}") {
        // probes use characters that generated ids never contain
        let service = service_with(&tenants);
        let mut query = service.create_tenant_query();
        query.tenant_id(probe).unwrap();

        prop_assert_eq!(query.count().unwrap(), 0);
        prop_assert_eq!(query.single_result().unwrap(), None);
    }

    #[test]
    fn prop_id_in_counts_intersection(
        tenants in tenant_map(),
        probe in prop::collection::btree_set("[a-z]{1,6}", 0..8),
    ) {
        let service = service_with(&tenants);
        let expected = probe.iter().filter(|id| tenants.contains_key(*id)).count() as u64;

        let mut query = service.create_tenant_query();
        query.tenant_id_in(probe.iter().cloned());
        prop_assert_eq!(query.count().unwrap(), expected);
    }

    #[test]
    fn prop_empty_id_in_matches_nothing(tenants in tenant_map()) {
        let service = service_with(&tenants);
        let mut query = service.create_tenant_query();
        query.tenant_id_in(BTreeSet::<String>::new());
        prop_assert_eq!(query.count().unwrap(), 0);
    }

    #[test]
    fn prop_lone_wildcard_matches_every_named_tenant(tenants in tenant_map()) {
        let service = service_with(&tenants);
        let named = tenants.values().filter(|name| name.is_some()).count() as u64;

        let mut query = service.create_tenant_query();
        query.tenant_name_like("%").unwrap();
        prop_assert_eq!(query.count().unwrap(), named);
    }

    #[test]
    fn prop_literal_like_equals_exact_name(tenants in tenant_map(), probe in "[A-Za-z ]{1,8}") {
        let service = service_with(&tenants);

        let mut like = service.create_tenant_query();
        like.tenant_name_like(&probe).unwrap().order_by_tenant_id();
        let mut exact = service.create_tenant_query();
        exact.tenant_name(probe.clone()).unwrap().order_by_tenant_id();

        prop_assert_eq!(like.list().unwrap(), exact.list().unwrap());
    }

    #[test]
    fn prop_substring_pattern_matches_contains(value in "[a-z %]{0,12}", needle in "[a-z ]{0,4}") {
        let pattern = LikePattern::parse(&format!("%{}%", needle)).unwrap();
        prop_assert_eq!(pattern.matches(&value), value.contains(&needle));
    }

    #[test]
    fn prop_desc_is_reverse_of_asc_on_unique_ids(tenants in tenant_map()) {
        let service = service_with(&tenants);

        let asc = service.create_tenant_query().order_by_tenant_id().asc().unwrap().list().unwrap();
        let mut desc = service.create_tenant_query().order_by_tenant_id().desc().unwrap().list().unwrap();
        desc.reverse();
        prop_assert_eq!(&asc, &desc);

        for pair in asc.windows(2) {
            prop_assert!(pair[0].id() < pair[1].id());
        }
    }

    #[test]
    fn prop_last_direction_wins(tenants in tenant_map()) {
        let service = service_with(&tenants);

        let toggled = service
            .create_tenant_query()
            .order_by_tenant_id()
            .asc()
            .unwrap()
            .desc()
            .unwrap()
            .list()
            .unwrap();
        let desc = service.create_tenant_query().order_by_tenant_id().desc().unwrap().list().unwrap();
        prop_assert_eq!(toggled, desc);
    }

    #[test]
    fn prop_count_is_idempotent(tenants in tenant_map(), pattern in "%?[A-Za-z ]{0,3}%") {
        let service = service_with(&tenants);
        let mut query = service.create_tenant_query();
        query.tenant_name_like(&pattern).unwrap();

        prop_assert_eq!(query.count().unwrap(), query.count().unwrap());
        prop_assert_eq!(query.count().unwrap(), query.list().unwrap().len() as u64);
    }

    #[test]
    fn prop_single_result_agrees_with_count(tenants in tenant_map(), name in "[A-Za-z ]{1,3}") {
        let service = service_with(&tenants);
        let mut query = service.create_tenant_query();
        query.tenant_name(name).unwrap();

        let count = query.count().unwrap();
        match query.single_result() {
            Ok(None) => prop_assert_eq!(count, 0),
            Ok(Some(_)) => prop_assert_eq!(count, 1),
            Err(IdentityError::TooManyResults { count: reported }) => {
                prop_assert!(count > 1);
                prop_assert_eq!(reported, count);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
