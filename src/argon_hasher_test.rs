#[cfg(test)]
mod tests {
    use super::super::argon_hasher::{ArgonHasher, Config};

    fn test_hasher() -> ArgonHasher {
        ArgonHasher::new(Config {
            iterations: 1,
            parallelism: 1,
            memory_cost: 64,
            secret_key: b"test-pepper".to_vec(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash("hunter2").await.unwrap();

        assert!(hasher.verify("hunter2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_does_not_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash("hunter2").await.unwrap();

        assert!(!hasher.verify("hunter3", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = test_hasher();
        let first = hasher.hash("hunter2").await.unwrap();
        let second = hasher.hash("hunter2").await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("hunter2", &first).await.unwrap());
        assert!(hasher.verify("hunter2", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_an_error() {
        let hasher = test_hasher();
        assert!(hasher.verify("hunter2", "not-a-phc-string").await.is_err());
    }
}
