#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordCost;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenCodec;
use chrono::Duration;
use chrono::Utc;
use rental_service::access::guard::AccessGuard;
use rental_service::identity::models::EmailAddress;
use rental_service::identity::models::FullName;
use rental_service::identity::models::Identity;
use rental_service::identity::models::IdentityId;
use rental_service::identity::models::RegistrationPolicy;
use rental_service::identity::ports::CredentialStore;
use rental_service::identity::service::AuthService;
use rental_service::inbound::http::router::access_policies;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::repositories::memory::InMemoryCredentialStore;
use rental_service::repositories::memory::InMemoryRoomRepository;
use rental_service::room::models::NewRoom;
use rental_service::room::models::Room;
use rental_service::room::models::RoomType;
use rental_service::room::ports::RoomRepository;
use rental_service::room::service::RoomService;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "Abc12345!";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: Arc<InMemoryCredentialStore>,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap cost keeps the suite fast.
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Invalid password cost");
        let authenticator = Arc::new(Authenticator::new(
            hasher,
            TEST_SECRET,
            Duration::hours(24),
        ));

        let store = Arc::new(InMemoryCredentialStore::new());
        let rooms = Arc::new(InMemoryRoomRepository::new());

        let state = AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
                RegistrationPolicy::default(),
            )),
            room_service: Arc::new(RoomService::new(Arc::clone(&rooms))),
            access_guard: Arc::new(AccessGuard::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
                access_policies(),
            )),
        };

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            store,
            rooms,
            authenticator,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register through the public endpoint.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "fullName": full_name,
                "email": email,
                "password": password,
                "confirmPassword": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token.
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Insert an identity with `TEST_PASSWORD` directly into the store.
    ///
    /// This is the only way to get ADMIN or COLLABORATOR identities without
    /// an existing admin.
    pub async fn seed_identity(&self, email: &str, role: Role) -> Identity {
        let now = Utc::now();
        let identity = Identity {
            id: IdentityId::new(),
            full_name: FullName::new("Seeded User").unwrap(),
            email: EmailAddress::new(email).unwrap(),
            password_hash: self.authenticator.hash_password(TEST_PASSWORD).unwrap(),
            role,
            created_at: now,
            updated_at: now,
        };

        self.store
            .insert(identity)
            .await
            .expect("Failed to seed identity")
    }

    /// Seed an identity and return it with a valid session token.
    pub async fn seed_session(&self, email: &str, role: Role) -> (Identity, String) {
        let identity = self.seed_identity(email, role).await;
        let token = self
            .authenticator
            .generate_token(&identity.subject())
            .expect("Failed to issue token");
        (identity, token)
    }

    /// Token for `identity` signed with the server secret but already expired.
    pub fn expired_token(&self, identity: &Identity) -> String {
        TokenCodec::new(TEST_SECRET)
            .issue_at(
                &identity.subject(),
                Duration::hours(1),
                Utc::now().timestamp() - 7200,
            )
            .expect("Failed to issue token")
    }
}

impl TestApp {
    /// Insert a listing owned by `owner` directly into the repository.
    pub async fn seed_room(&self, owner: &Identity) -> Room {
        let listing = NewRoom {
            title: "Seeded room".to_string(),
            description: "Owned by a seeded identity".to_string(),
            room_type: RoomType::Single,
            status: None,
            area: 15.0,
            price_per_month: 1_500_000,
            deposit: 0,
            max_occupants: 1,
            floor: 2,
        };
        let room = Room::create(listing, owner.id).expect("Invalid seeded room");

        self.rooms.insert(room).await.expect("Failed to seed room")
    }
}

pub fn room_body() -> Value {
    json!({
        "title": "Sunny studio near the river",
        "description": "Quiet street, fully furnished",
        "roomType": "studio",
        "area": 25.5,
        "pricePerMonth": 3500000,
        "deposit": 3500000,
        "maxOccupants": 2,
        "floor": 3
    })
}
