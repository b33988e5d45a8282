//! Android JNI test harness for rumblekit.
//!
//! This crate is only compiled for Android targets.
//! To build: cargo ndk -t arm64-v8a build -p rumblekit-test-android
//!
//! The matching `native` declarations live in the test app's
//! `com.rumblekit.test.MainActivity`.

#![cfg(target_os = "android")]
#![allow(non_snake_case)]

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{jint, jstring};
use rumblekit_haptic::sys::android::dispatcher_with_context;
use rumblekit_haptic::{Dispatcher, FeedbackType, HapticConfig};

static DISPATCHER: OnceLock<Mutex<Dispatcher>> = OnceLock::new();

fn with_dispatcher(f: impl FnOnce(&mut Dispatcher)) {
    let Some(dispatcher) = DISPATCHER.get() else {
        log::warn!("nativeInit has not been called");
        return;
    };
    let mut guard: MutexGuard<'_, Dispatcher> =
        dispatcher.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut *guard);
}

/// Sets up logging and the dispatcher. `config` is an optional JSON string.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_rumblekit_test_MainActivity_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
    config: JString,
) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("rumblekit"),
    );

    let config = if config.is_null() {
        HapticConfig::default()
    } else {
        let json: Option<String> = env.get_string(&config).ok().map(Into::into);
        match json.as_deref().map(HapticConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("{e}, using defaults");
                HapticConfig::default()
            }
            None => HapticConfig::default(),
        }
    };

    match dispatcher_with_context(&mut env, &context, config) {
        Ok(mut dispatcher) => {
            dispatcher.initialize();
            let _ = DISPATCHER.set(Mutex::new(dispatcher));
        }
        Err(e) => log::error!("haptics unavailable: {e}"),
    }
}

/// Plays `FeedbackType::ALL[kind]`. Unknown kinds are ignored.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_rumblekit_test_MainActivity_nativeTrigger(
    _env: JNIEnv,
    _class: JClass,
    kind: jint,
) {
    let Some(feedback) = usize::try_from(kind).ok().and_then(FeedbackType::from_index) else {
        log::warn!("unknown feedback kind {kind}");
        return;
    };
    with_dispatcher(|dispatcher| dispatcher.trigger(feedback));
}

/// Plays the default medium vibration.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_rumblekit_test_MainActivity_nativeVibrate(
    _env: JNIEnv,
    _class: JClass,
) {
    with_dispatcher(Dispatcher::vibrate);
}

/// Stops any running vibration.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_rumblekit_test_MainActivity_nativeCancel(
    _env: JNIEnv,
    _class: JClass,
) {
    with_dispatcher(Dispatcher::cancel);
}

/// Releases native resources.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_rumblekit_test_MainActivity_nativeRelease(
    _env: JNIEnv,
    _class: JClass,
) {
    with_dispatcher(Dispatcher::release);
}

/// Returns the OS description the backend sees, or null on failure.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_rumblekit_test_MainActivity_nativeOsVersion(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let mut version = None;
    with_dispatcher(|dispatcher| version = dispatcher.os_version());
    version
        .and_then(|version| env.new_string(version).ok())
        .map_or(std::ptr::null_mut(), JString::into_raw)
}
