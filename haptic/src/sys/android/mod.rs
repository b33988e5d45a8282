//! Android vibrator binding using JNI.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::jlong;
use jni::{JNIEnv, JavaVM};

use crate::android::{VibrationEffect, Vibrator};
use crate::{Dispatcher, HapticConfig, HapticError};

const EFFECT_CLASS: &str = "android/os/VibrationEffect";
const VERSION_CLASS: &str = "android/os/Build$VERSION";
/// Room for the effect, its arrays and the class lookup of one call.
const LOCAL_FRAME_CAPACITY: i32 = 8;

fn jni_error(call: &'static str) -> impl Fn(jni::errors::Error) -> HapticError {
    move |e| HapticError::Platform(format!("{call} failed: {e}"))
}

/// Builds a dispatcher around the `Context`'s vibrator service.
///
/// Devices without a vibrator get the no-op backend.
///
/// # Errors
/// Returns an error if the vibrator service cannot be looked up.
pub fn dispatcher_with_context(
    env: &mut JNIEnv,
    context: &JObject,
    config: HapticConfig,
) -> Result<Dispatcher, HapticError> {
    match JniVibrator::from_context(env, context) {
        Ok(vibrator) => Ok(Dispatcher::android(vibrator, config)),
        Err(HapticError::NotSupported) => {
            log::info!("device has no vibrator, haptics disabled");
            Ok(Dispatcher::noop())
        }
        Err(e) => Err(e),
    }
}

/// `android.os.Vibrator` reached through JNI.
///
/// Holds a global reference to the system service and attaches the calling
/// thread to the VM for each call.
pub struct JniVibrator {
    vm: JavaVM,
    vibrator: GlobalRef,
    effect_class: OnceLock<GlobalRef>,
}

impl fmt::Debug for JniVibrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JniVibrator").finish_non_exhaustive()
    }
}

impl JniVibrator {
    /// Looks up the vibrator service from an Android `Context`.
    ///
    /// # Errors
    /// Returns [`HapticError::NotSupported`] if the device has no vibrator,
    /// or [`HapticError::Platform`] if a JNI call fails.
    pub fn from_context(env: &mut JNIEnv, context: &JObject) -> Result<Self, HapticError> {
        let service_name = env
            .new_string("vibrator")
            .map_err(jni_error("new_string"))?;

        let vibrator = env
            .call_method(
                context,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&service_name)],
            )
            .map_err(jni_error("getSystemService"))?
            .l()
            .map_err(jni_error("getSystemService result"))?;

        if vibrator.is_null() {
            return Err(HapticError::NotSupported);
        }

        let has_vibrator = env
            .call_method(&vibrator, "hasVibrator", "()Z", &[])
            .map_err(jni_error("hasVibrator"))?
            .z()
            .map_err(jni_error("hasVibrator result"))?;

        if !has_vibrator {
            return Err(HapticError::NotSupported);
        }

        let vibrator = env
            .new_global_ref(vibrator)
            .map_err(jni_error("new_global_ref"))?;
        let vm = env.get_java_vm().map_err(jni_error("get_java_vm"))?;

        Ok(Self {
            vm,
            vibrator,
            effect_class: OnceLock::new(),
        })
    }

    fn with_env<T>(
        &self,
        f: impl FnOnce(&mut JNIEnv, &JObject) -> Result<T, HapticError>,
    ) -> Result<T, HapticError> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(jni_error("attach_current_thread"))?;

        // Threads attached by the game engine never return to Java, so local
        // refs made here are only freed by popping the frame.
        let vibrator = self.vibrator.as_obj();
        let result = env
            .with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
                Ok::<_, jni::errors::Error>(f(env, vibrator))
            })
            .map_err(jni_error("with_local_frame"))
            .and_then(|result| result);

        // A pending Java exception would abort the next JNI call.
        if result.is_err() && env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        result
    }

    fn effect_class(&self, env: &mut JNIEnv) -> Result<GlobalRef, HapticError> {
        if let Some(class) = self.effect_class.get() {
            return Ok(class.clone());
        }
        let class = env
            .find_class(EFFECT_CLASS)
            .map_err(jni_error("find VibrationEffect"))?;
        let class = env
            .new_global_ref(class)
            .map_err(jni_error("new_global_ref"))?;
        Ok(self.effect_class.get_or_init(|| class).clone())
    }

    fn create_effect<'local>(
        &self,
        env: &mut JNIEnv<'local>,
        effect: &VibrationEffect,
    ) -> Result<JObject<'local>, HapticError> {
        let class_ref = self.effect_class(env)?;
        let class = <&JClass>::from(class_ref.as_obj());

        let value = match effect {
            VibrationEffect::OneShot {
                duration_ms,
                amplitude,
            } => env
                .call_static_method(
                    class,
                    "createOneShot",
                    "(JI)Landroid/os/VibrationEffect;",
                    &[
                        JValue::Long(to_jlong(*duration_ms)),
                        JValue::Int(i32::from(*amplitude)),
                    ],
                )
                .map_err(jni_error("createOneShot"))?,
            VibrationEffect::Waveform(waveform) => {
                let timings = long_array(env, waveform.timings())?;
                let repeat = to_repeat(waveform.repeat());
                match waveform.amplitudes() {
                    Some(amplitudes) => {
                        let amplitudes = int_array(env, amplitudes)?;
                        env.call_static_method(
                            class,
                            "createWaveform",
                            "([J[II)Landroid/os/VibrationEffect;",
                            &[
                                JValue::Object(&timings),
                                JValue::Object(&amplitudes),
                                JValue::Int(repeat),
                            ],
                        )
                    }
                    None => env.call_static_method(
                        class,
                        "createWaveform",
                        "([JI)Landroid/os/VibrationEffect;",
                        &[JValue::Object(&timings), JValue::Int(repeat)],
                    ),
                }
                .map_err(jni_error("createWaveform"))?
            }
        };

        value.l().map_err(jni_error("VibrationEffect result"))
    }
}

impl Vibrator for JniVibrator {
    fn os_description(&self) -> Option<String> {
        let description = self.with_env(|env, _| {
            let sdk = env
                .get_static_field(VERSION_CLASS, "SDK_INT", "I")
                .map_err(jni_error("Build.VERSION.SDK_INT"))?
                .i()
                .map_err(jni_error("SDK_INT value"))?;

            let release = env
                .get_static_field(VERSION_CLASS, "RELEASE", "Ljava/lang/String;")
                .map_err(jni_error("Build.VERSION.RELEASE"))?
                .l()
                .map_err(jni_error("RELEASE value"))?;
            let release = JString::from(release);
            let release = env
                .get_string(&release)
                .map_err(jni_error("get_string"))?
                .to_str()
                .map(Cow::into_owned)
                .map_err(|e| HapticError::Platform(format!("RELEASE to_str failed: {e}")))?;

            Ok(format!("Android OS {release} / API-{sdk}"))
        });

        match description {
            Ok(description) => Some(description),
            Err(e) => {
                log::warn!("could not read Android version: {e}");
                None
            }
        }
    }

    fn vibrate(&mut self, duration_ms: u64) -> Result<(), HapticError> {
        self.with_env(|env, vibrator| {
            env.call_method(
                vibrator,
                "vibrate",
                "(J)V",
                &[JValue::Long(to_jlong(duration_ms))],
            )
            .map_err(jni_error("vibrate(long)"))?;
            Ok(())
        })
    }

    fn vibrate_pattern(
        &mut self,
        timings: &[u64],
        repeat: Option<usize>,
    ) -> Result<(), HapticError> {
        let repeat = to_repeat(repeat);
        self.with_env(|env, vibrator| {
            let pattern = long_array(env, timings)?;
            env.call_method(
                vibrator,
                "vibrate",
                "([JI)V",
                &[JValue::Object(&pattern), JValue::Int(repeat)],
            )
            .map_err(jni_error("vibrate(long[], int)"))?;
            Ok(())
        })
    }

    fn vibrate_effect(&mut self, effect: VibrationEffect) -> Result<(), HapticError> {
        self.with_env(|env, vibrator| {
            let effect = self.create_effect(env, &effect)?;
            env.call_method(
                vibrator,
                "vibrate",
                "(Landroid/os/VibrationEffect;)V",
                &[JValue::Object(&effect)],
            )
            .map_err(jni_error("vibrate(VibrationEffect)"))?;
            Ok(())
        })
    }

    fn cancel(&mut self) -> Result<(), HapticError> {
        self.with_env(|env, vibrator| {
            env.call_method(vibrator, "cancel", "()V", &[])
                .map_err(jni_error("cancel"))?;
            Ok(())
        })
    }
}

fn to_jlong(value: u64) -> jlong {
    jlong::try_from(value).unwrap_or(jlong::MAX)
}

/// Android marks "play once" with `-1`.
fn to_repeat(repeat: Option<usize>) -> i32 {
    repeat.map_or(-1, |index| i32::try_from(index).unwrap_or(-1))
}

fn long_array<'local>(
    env: &mut JNIEnv<'local>,
    values: &[u64],
) -> Result<JObject<'local>, HapticError> {
    let len = i32::try_from(values.len())
        .map_err(|_| HapticError::Platform("pattern too long".into()))?;
    let values: Vec<jlong> = values.iter().copied().map(to_jlong).collect();
    let array = env
        .new_long_array(len)
        .map_err(jni_error("new_long_array"))?;
    env.set_long_array_region(&array, 0, &values)
        .map_err(jni_error("set_long_array_region"))?;
    Ok(array.into())
}

fn int_array<'local>(
    env: &mut JNIEnv<'local>,
    values: &[u8],
) -> Result<JObject<'local>, HapticError> {
    let len = i32::try_from(values.len())
        .map_err(|_| HapticError::Platform("pattern too long".into()))?;
    let values: Vec<i32> = values.iter().copied().map(i32::from).collect();
    let array = env
        .new_int_array(len)
        .map_err(jni_error("new_int_array"))?;
    env.set_int_array_region(&array, 0, &values)
        .map_err(jni_error("set_int_array_region"))?;
    Ok(array.into())
}
