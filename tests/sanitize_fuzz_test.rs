use rand::Rng;
use resumr::text::{encode_win_ansi, sanitize};

const ITERATIONS: usize = 2000;
const MAXIMUM_STRING_LENGTH: usize = 120;

fn random_utf8_characters(rng: &mut rand::rngs::ThreadRng) -> String {
    let length = rng.gen_range(1..=MAXIMUM_STRING_LENGTH);
    rand_utf8::rand_utf8(rng, length).to_string()
}

#[test]
fn sanitized_text_is_always_encodable() {
    let mut rng = rand::thread_rng();

    for _ in 0..ITERATIONS {
        let text = random_utf8_characters(&mut rng);
        let sanitized_text = sanitize(&text);

        assert!(
            sanitized_text.chars().count() <= text.chars().count(),
            "{:?} grew into {:?}",
            text,
            sanitized_text
        );
        if let Err(error) = encode_win_ansi(&sanitized_text) {
            panic!("{:?} was sanitized into {:?}: {}", text, sanitized_text, error);
        }
    }
}

#[test]
fn sanitizing_twice_changes_nothing() {
    let mut rng = rand::thread_rng();

    for _ in 0..ITERATIONS {
        let sanitized_text = sanitize(&random_utf8_characters(&mut rng));
        assert_eq!(sanitize(&sanitized_text), sanitized_text);
    }
}
