//! Push Pipeline - 客户端推送通知投递管道
//!
//! 接收传输层送达的原始推送消息，根据持久化设置与已注册的交互分类
//! 决定是否展示、展示什么、暴露哪些动作，并把点击以结构化事件路由回
//! 应用层。
//!
//! # 使用示例
//! ```ignore
//! use push_pipeline::{Message, MessageHandler};
//!
//! let handler = MessageHandler::builder()
//!     .config(config)
//!     .registry(registry)
//!     .picture_fetcher(fetcher)
//!     .permissions(permissions)
//!     .resources(resources)
//!     .display(display)
//!     .broadcaster(broadcaster)
//!     .foreground(foreground)
//!     .build()?;
//!
//! handler.handle_message(&message);
//! ```

pub mod builder;
pub mod category;
pub mod category_store;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod event;
pub mod handler;
pub mod id_allocator;
pub mod message;
pub mod picture;
pub mod platform;
pub mod resolver;
pub mod router;
pub mod settings;
pub mod util;

pub use builder::NotificationBuilder;
pub use category::{CategoryRegistry, CategorySnapshot, InteractiveCategory, NotificationAction};
pub use category_store::JsonCategoryStore;
pub use config::{ConfigStore, JsonConfigStore, MemoryConfigStore, DEFAULT_MAX_RETRY_COUNT};
pub use descriptor::{
    ActionDescriptor, NotificationDescriptor, NotificationStyle, PendingReference, SoundSpec,
};
pub use error::PipelineError;
pub use event::{Broadcaster, Event};
pub use handler::{MessageHandler, MessageHandlerBuilder};
pub use id_allocator::DEFAULT_NOTIFICATION_ID;
pub use message::Message;
pub use picture::{HttpPictureFetcher, PictureFetcher};
pub use platform::{
    Capability, ForegroundMonitor, IconRef, NotificationDisplay, PermissionChecker,
    ResourceResolver,
};
pub use resolver::ResolvedSettings;
pub use router::{ActionDispatch, ActionRouter};
pub use settings::{NotificationSettings, NotificationSettingsBuilder};
