//! Global low-level keyboard hook.
//!
//! The hook procedure runs on a dedicated thread that pumps its own message
//! loop. It never blocks: each transition is `try_send`'d into the key feed
//! and dropped if the queue is full. Dropping [`KeyboardHook`] posts
//! `WM_QUIT` to that thread, which unhooks and exits.

use std::sync::OnceLock;
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, bounded};
use log::{debug, error, info};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetMessageW, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, LLKHF_UP, MSG,
    PostThreadMessageW, SetWindowsHookExW, UnhookWindowsHookEx, WH_KEYBOARD_LL, WM_KEYDOWN,
    WM_KEYUP, WM_QUIT, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::events::keyboard::KeyEvent;

// The hook procedure has no user data pointer, so the sender lives here.
static KEY_SENDER: OnceLock<Sender<KeyEvent>> = OnceLock::new();

/// Handle to the installed hook; uninstalls on drop.
pub struct KeyboardHook {
    thread_id: u32,
    handle: Option<JoinHandle<()>>,
}

impl KeyboardHook {
    /// Install the hook on a new thread. Can only succeed once per process.
    pub fn install(tx: Sender<KeyEvent>) -> Result<Self, String> {
        KEY_SENDER
            .set(tx)
            .map_err(|_| "keyboard hook already installed".to_string())?;

        let (ready_tx, ready_rx) = bounded::<Result<u32, String>>(1);
        let handle = std::thread::Builder::new()
            .name("keyboard-hook".to_string())
            .spawn(move || hook_thread(ready_tx))
            .map_err(|e| format!("failed to spawn keyboard hook thread: {}", e))?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                info!("Keyboard hook installed");
                Ok(Self {
                    thread_id,
                    handle: Some(handle),
                })
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => Err("keyboard hook thread exited during setup".to_string()),
        }
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        // SAFETY: posting to a thread id we own; failure only means the thread is gone.
        let _ = unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) };
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        debug!("Keyboard hook removed");
    }
}

fn hook_thread(ready: Sender<Result<u32, String>>) {
    // SAFETY: plain Win32 calls; the hook is removed on this same thread
    // before it exits.
    let hook = unsafe {
        GetModuleHandleW(None).and_then(|module| {
            SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), HINSTANCE::from(module), 0)
        })
    };
    let hook = match hook {
        Ok(hook) => hook,
        Err(e) => {
            error!("SetWindowsHookExW failed: {}", e);
            let _ = ready.send(Err(format!("failed to install keyboard hook: {}", e)));
            return;
        }
    };
    let _ = ready.send(Ok(unsafe { GetCurrentThreadId() }));

    let mut msg = MSG::default();
    loop {
        // 0 on WM_QUIT, -1 on error.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };
        if ret.0 <= 0 {
            break;
        }
    }

    if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
        error!("UnhookWindowsHookEx failed: {}", e);
    }
}

/// Map a hook notification to a key transition.
fn translate(message: u32, vk_code: u32, flags: u32) -> Option<KeyEvent> {
    match message {
        WM_KEYDOWN | WM_SYSKEYDOWN if flags & LLKHF_UP.0 == 0 => Some(KeyEvent::down(vk_code)),
        WM_KEYUP | WM_SYSKEYUP => Some(KeyEvent::up(vk_code)),
        _ => None,
    }
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        // SAFETY: for WH_KEYBOARD_LL with HC_ACTION, lparam points to a KBDLLHOOKSTRUCT.
        let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
        if let (Some(event), Some(tx)) = (
            translate(wparam.0 as u32, info.vkCode, info.flags.0),
            KEY_SENDER.get(),
        ) {
            let _ = tx.try_send(event);
        }
    }
    unsafe { CallNextHookEx(HHOOK::default(), code, wparam, lparam) }
}
