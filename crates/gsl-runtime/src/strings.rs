//! String operators and coercions.

use std::ffi::c_char;

use gsl_core::scalar;
use gsl_core::{int_to_string, string_to_int};

use crate::handle::{ArcHandle, GraphHandle, NodeHandle};
use crate::state::{read_str, return_str, run};

/// Applies a string operator to two C string arguments.
///
/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
unsafe fn binary(
    op: &'static str,
    a: *const c_char,
    b: *const c_char,
    f: fn(Option<&[u8]>, Option<&[u8]>) -> Vec<u8>,
) -> *const c_char {
    // SAFETY: forwarded from the caller.
    let (a, b) = unsafe { (read_str(a), read_str(b)) };
    return_str(op, f(a.as_deref(), b.as_deref()))
}

/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn concatString(a: *const c_char, b: *const c_char) -> *const c_char {
    unsafe { binary("concatString", a, b, scalar::add) }
}

/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn subtractString(a: *const c_char, b: *const c_char) -> *const c_char {
    unsafe { binary("subtractString", a, b, scalar::sub) }
}

/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn multiplyString(a: *const c_char, b: *const c_char) -> *const c_char {
    unsafe { binary("multiplyString", a, b, scalar::mul) }
}

/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn divideString(a: *const c_char, b: *const c_char) -> *const c_char {
    unsafe { binary("divideString", a, b, scalar::div) }
}

/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn stringEq(a: *const c_char, b: *const c_char) -> bool {
    let (a, b) = unsafe { (read_str(a), read_str(b)) };
    scalar::string_eq(a.as_deref(), b.as_deref())
}

/// # Safety
/// Both pointers must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn stringNeq(a: *const c_char, b: *const c_char) -> bool {
    let (a, b) = unsafe { (read_str(a), read_str(b)) };
    scalar::string_ne(a.as_deref(), b.as_deref())
}

/// # Safety
/// `s` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn castStringToInt(s: *const c_char) -> i32 {
    let s = unsafe { read_str(s) };
    string_to_int(s.as_deref())
}

#[no_mangle]
pub extern "C" fn castIntToString(x: i32) -> *const c_char {
    return_str("castIntToString", int_to_string(x).into_bytes())
}

/// # Safety
/// `s` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn castStringToNode(s: *const c_char) -> NodeHandle {
    let s = unsafe { read_str(s) };
    run("castStringToNode", |heap| {
        heap.string_to_node(s.as_deref()).map(NodeHandle::from)
    })
}

#[no_mangle]
pub extern "C" fn castNodeToArc(n: NodeHandle) -> ArcHandle {
    run("castNodeToArc", |heap| heap.node_to_arc(n.id()).map(ArcHandle::from))
}

#[no_mangle]
pub extern "C" fn castArcToGraph(a: ArcHandle) -> GraphHandle {
    run("castArcToGraph", |heap| heap.arc_to_graph(a.id()).map(GraphHandle::from))
}
