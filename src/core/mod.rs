pub mod api_map;
pub mod hooks;
pub mod path;
pub mod request;
pub mod resource_map;
pub mod response;

pub use api_map::ApiMap;
pub use hooks::{AfterHook, BeforeHook, HookError, HookResult, HookScope, HookVeto};
pub use path::build_full_path;
pub use request::{CallArgs, CallOptions, Request, RequestParams};
pub use resource_map::{CallError, EndpointMethod, ResourceMap};
pub use response::{Response, ResponseExtras};
