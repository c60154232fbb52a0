use std::{
	io::Write,
	sync::{Arc, Mutex},
};

use proptest::{prelude::*, test_runner::Config};

use pivnet_resource::services::sanitizer::{Sanitizer, SecretMapping};

use crate::properties::strategies::{
	overlapping_secrets_strategy, placeholder, planted_text_strategy, uppercase_text_strategy,
};

fn written(sink: &Arc<Mutex<Vec<u8>>>) -> Vec<u8> {
	sink.lock().unwrap().clone()
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_planted_secrets_are_replaced((secrets, text, expected) in planted_text_strategy()) {
		let mapping = SecretMapping::new(
			secrets.iter().enumerate().map(|(index, secret)| (secret.clone(), placeholder(index))),
		);
		let sink = Arc::new(Mutex::new(Vec::new()));
		let mut sanitizer = Sanitizer::new(mapping, Arc::clone(&sink));

		let accepted = sanitizer.write(text.as_bytes()).unwrap();

		prop_assert_eq!(accepted, text.len());
		prop_assert_eq!(String::from_utf8(written(&sink)).unwrap(), expected);
	}

	#[test]
	fn test_no_secret_survives(
		secrets in overlapping_secrets_strategy(),
		text in uppercase_text_strategy(),
	) {
		let mapping = SecretMapping::new(secrets.iter().map(|secret| (secret.clone(), "*")));
		let output = String::from_utf8(mapping.apply(text.as_bytes()).into_owned()).unwrap();

		for secret in &secrets {
			prop_assert!(
				!output.contains(secret.as_str()),
				"{:?} survived in {:?}",
				secret,
				output
			);
		}
	}

	#[test]
	fn test_empty_mapping_is_identity(chunk in prop::collection::vec(any::<u8>(), 0..256)) {
		let sink = Arc::new(Mutex::new(Vec::new()));
		let mut sanitizer = Sanitizer::new(SecretMapping::empty(), Arc::clone(&sink));

		prop_assert_eq!(sanitizer.write(&chunk).unwrap(), chunk.len());
		prop_assert_eq!(written(&sink), chunk);
	}

	#[test]
	fn test_text_without_secrets_is_untouched(
		secrets in overlapping_secrets_strategy(),
		text in "[a-z0-9 \n]{0,64}",
	) {
		let mapping = SecretMapping::new(secrets.iter().map(|secret| (secret.clone(), "*")));
		let applied = mapping.apply(text.as_bytes());
		prop_assert_eq!(applied.as_ref(), text.as_bytes());
	}

	#[test]
	fn test_chunks_are_sanitized_independently(
		(secrets, text, expected) in planted_text_strategy(),
		repeat in 1usize..4,
	) {
		let mapping = SecretMapping::new(
			secrets.iter().enumerate().map(|(index, secret)| (secret.clone(), placeholder(index))),
		);
		let sink = Arc::new(Mutex::new(Vec::new()));
		let mut sanitizer = Sanitizer::new(mapping, Arc::clone(&sink));

		for _ in 0..repeat {
			sanitizer.write_all(text.as_bytes()).unwrap();
		}

		prop_assert_eq!(String::from_utf8(written(&sink)).unwrap(), expected.repeat(repeat));
	}
}
