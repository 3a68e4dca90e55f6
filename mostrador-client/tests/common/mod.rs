//! In-process mock backend for integration tests
//!
//! A small axum app speaking the backend's wire format, with request
//! counters and payload capture so tests can assert exactly what
//! reached the wire.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const EMAIL: &str = "ana@example.com";
pub const PASSWORD: &str = "secret123";

pub struct BackendState {
    token: Mutex<String>,
    profile: Mutex<Value>,
    products: Mutex<Value>,
    customers: Mutex<Value>,
    pub product_hits: AtomicUsize,
    pub customer_hits: AtomicUsize,
    pub sale_hits: AtomicUsize,
    last_sale: Mutex<Option<Value>>,
    sale_failure: Mutex<Option<(u16, String)>>,
    sale_delay: Mutex<Duration>,
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    /// Bind on an ephemeral port and serve the default fixtures
    pub async fn spawn() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let state = Arc::new(BackendState {
            token: Mutex::new("valid-token".to_string()),
            profile: Mutex::new(json!({
                "id": "u1",
                "name": "Ana",
                "email": EMAIL,
                "role": "vendedor",
            })),
            products: Mutex::new(json!([
                {"id_producto": "p1", "nombre": "Yerba", "precio": "10.00", "stock": 5},
                {"id_producto": "p2", "nombre": "Cafe", "precio": 25, "stock": "3"},
            ])),
            customers: Mutex::new(json!([
                {"id": "c1", "nombre": "Ana Gomez", "dni": "30111222", "telefono": "123"},
                {"id": "c2", "nombre": "Bruno Diaz", "dni": "28999888", "telefono": "456"},
            ])),
            product_hits: AtomicUsize::new(0),
            customer_hits: AtomicUsize::new(0),
            sale_hits: AtomicUsize::new(0),
            last_sale: Mutex::new(None),
            sale_failure: Mutex::new(None),
            sale_delay: Mutex::new(Duration::ZERO),
        });

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/profile", get(profile))
            .route("/producto", get(list_products))
            .route("/cliente", get(list_customers))
            .route("/venta", post(create_sale))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn valid_token(&self) -> String {
        self.state.token.lock().unwrap().clone()
    }

    /// Rotate the accepted token; requests carrying the old one now 401
    pub fn rotate_token(&self, token: &str) {
        *self.state.token.lock().unwrap() = token.to_string();
    }

    pub fn set_profile(&self, profile: Value) {
        *self.state.profile.lock().unwrap() = profile;
    }

    pub fn set_products(&self, products: Value) {
        *self.state.products.lock().unwrap() = products;
    }

    /// Make `POST /venta` answer with the given status and message
    pub fn fail_sales(&self, status: u16, message: &str) {
        *self.state.sale_failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn set_sale_delay(&self, delay: Duration) {
        *self.state.sale_delay.lock().unwrap() = delay;
    }

    pub fn last_sale(&self) -> Option<Value> {
        self.state.last_sale.lock().unwrap().clone()
    }

    pub fn product_hits(&self) -> usize {
        self.state.product_hits.load(Ordering::SeqCst)
    }

    pub fn sale_hits(&self) -> usize {
        self.state.sale_hits.load(Ordering::SeqCst)
    }
}

fn authorized(state: &BackendState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.token.lock().unwrap());
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false)
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Unauthorized", "statusCode": 401})),
    )
}

async fn login(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        let token = state.token.lock().unwrap().clone();
        (StatusCode::OK, Json(json!({"access_token": token})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials", "statusCode": 401})),
        )
    }
}

async fn profile(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(state.profile.lock().unwrap().clone()))
}

async fn list_products(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.product_hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, Json(state.products.lock().unwrap().clone()))
}

async fn list_customers(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    state.customer_hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, Json(state.customers.lock().unwrap().clone()))
}

async fn create_sale(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let delay = *state.sale_delay.lock().unwrap();
    if delay > Duration::ZERO {
        tokio::time::sleep(delay).await;
    }

    state.sale_hits.fetch_add(1, Ordering::SeqCst);

    if let Some((status, message)) = state.sale_failure.lock().unwrap().clone() {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({"message": message, "statusCode": status})),
        );
    }

    *state.last_sale.lock().unwrap() = Some(body.clone());

    let detalles: Vec<Value> = body["detalles"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, d)| {
            json!({
                "id_detalle": format!("d{i}"),
                "cantidad": d["cantidad"],
                "precioSubTotal": d["precioSubTotal"],
                "id_producto": d["id_producto"],
                "id_venta": "v-1",
            })
        })
        .collect();

    (
        StatusCode::CREATED,
        Json(json!({
            "id_venta": "v-1",
            "precioTotal": body["venta"]["precioTotal"],
            "createdAt": "2024-11-02T10:00:00.000Z",
            "id_cliente": body["venta"]["id_cliente"],
            "detalles": detalles,
        })),
    )
}
