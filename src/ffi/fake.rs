//! In-process stand-in for libclang used by the unit tests.
//!
//! State is thread-local, so tests running in parallel each see their own
//! tree and counters. Call [`reset`] at the start of every test.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::path::Path;
use std::ptr;

use super::handles::{CXFile, CXIndex, CXTranslationUnit};
use super::library::LibClang;
use super::raw::*;

pub const TRANSLATION_UNIT: c_int = 350;
pub const FUNCTION_DECL: c_int = 8;
pub const VAR_DECL: c_int = 9;
pub const PARM_DECL: c_int = 10;
pub const COMPOUND_STMT: c_int = 202;
pub const INTEGER_LITERAL: c_int = 106;
pub const NULL_CURSOR: c_int = 70;

pub const TYPE_INVALID: c_int = 0;
pub const TYPE_INT: c_int = 17;
pub const TYPE_FUNCTION_PROTO: c_int = 111;

static FAKE_FILE: u8 = 0;

#[derive(Debug, Clone)]
struct FakeNode {
    kind: c_int,
    name: String,
    column: c_uint,
    offset: c_uint,
    line: c_uint,
    has_file: bool,
    children: Vec<usize>,
}

/// Counters and the arguments of the last parse.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub strings_created: usize,
    pub strings_disposed: usize,
    pub indexes_created: usize,
    pub indexes_disposed: usize,
    pub units_created: usize,
    pub units_disposed: usize,
    pub last_index_options: Option<(c_int, c_int)>,
    pub last_argc: Option<c_int>,
    pub last_argv_null: bool,
    pub last_args: Vec<String>,
    pub last_filename: Option<String>,
    pub last_unsaved: Vec<(String, Vec<u8>)>,
    pub last_options: c_uint,
}

impl Stats {
    /// Strings handed out and not yet disposed.
    pub fn outstanding_strings(&self) -> usize {
        self.strings_created - self.strings_disposed
    }
}

#[derive(Default)]
struct FakeState {
    nodes: Vec<FakeNode>,
    stats: Stats,
}

thread_local! {
    static STATE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

fn root() -> FakeNode {
    FakeNode {
        kind: TRANSLATION_UNIT,
        name: "fake.c".to_string(),
        line: 0,
        column: 0,
        offset: 0,
        has_file: false,
        children: Vec::new(),
    }
}

/// Reset this thread's tree to a lone translation-unit root and zero the
/// counters.
pub fn reset() {
    STATE.with(|s| {
        let mut s = s.borrow_mut();
        s.nodes = vec![root()];
        s.stats = Stats::default();
    });
}

/// Add a node under `parent` and return its id. The node gets a file, and a
/// position derived from its id.
pub fn add_node(parent: usize, kind: c_int, name: &str) -> usize {
    STATE.with(|s| {
        let mut s = s.borrow_mut();
        let id = s.nodes.len();
        s.nodes.push(FakeNode {
            kind,
            name: name.to_string(),
            line: id as c_uint,
            column: id as c_uint + 4,
            offset: id as c_uint * 100,
            has_file: true,
            children: Vec::new(),
        });
        s.nodes[parent].children.push(id);
        id
    })
}

/// Make a node's locations resolve to no file.
pub fn detach_file(id: usize) {
    STATE.with(|s| s.borrow_mut().nodes[id].has_file = false);
}

/// Snapshot of this thread's counters.
pub fn stats() -> Stats {
    STATE.with(|s| s.borrow().stats.clone())
}

/// Raw cursor for node `id`.
pub fn cursor(id: usize) -> CXCursor {
    let kind = STATE.with(|s| s.borrow().nodes.get(id).map_or(NULL_CURSOR, |n| n.kind));
    CXCursor {
        kind,
        xdata: 0,
        data: [id as *const c_void, ptr::null(), ptr::null()],
    }
}

fn node_id(ptr: *const c_void) -> usize {
    ptr as usize
}

fn node(id: usize) -> FakeNode {
    STATE.with(|s| s.borrow().nodes.get(id).cloned().unwrap_or_else(root))
}

fn with_stats(f: impl FnOnce(&mut Stats)) {
    STATE.with(|s| f(&mut s.borrow_mut().stats));
}

fn make_string(value: Option<&str>) -> CXString {
    with_stats(|stats| stats.strings_created += 1);
    let data = match value.and_then(|v| CString::new(v).ok()) {
        Some(s) => s.into_raw() as *const c_void,
        None => ptr::null(),
    };
    CXString {
        data,
        private_flags: 1,
    }
}

unsafe extern "C" fn get_cstring(s: CXString) -> *const c_char {
    s.data as *const c_char
}

unsafe extern "C" fn dispose_string(s: CXString) {
    if !s.data.is_null() {
        drop(CString::from_raw(s.data as *mut c_char));
    }
    with_stats(|stats| stats.strings_disposed += 1);
}

unsafe extern "C" fn clang_version() -> CXString {
    make_string(Some("fake clang version 1.0.0"))
}

unsafe extern "C" fn create_index(exclude: c_int, display: c_int) -> CXIndex {
    with_stats(|stats| {
        stats.indexes_created += 1;
        stats.last_index_options = Some((exclude, display));
    });
    CXIndex::from_ptr(Box::into_raw(Box::new(0u8)) as *mut c_void)
}

unsafe extern "C" fn dispose_index(index: CXIndex) {
    if !index.is_null() {
        drop(Box::from_raw(index.as_ptr() as *mut u8));
    }
    with_stats(|stats| stats.indexes_disposed += 1);
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn parse(
    index: CXIndex,
    filename: *const c_char,
    argv: *const *const c_char,
    argc: c_int,
    unsaved: *mut CXUnsavedFile,
    unsaved_count: c_uint,
    options: c_uint,
    out: *mut CXTranslationUnit,
) -> CXErrorCode {
    let filename = if filename.is_null() {
        None
    } else {
        Some(CStr::from_ptr(filename).to_string_lossy().into_owned())
    };

    let mut args = Vec::new();
    if !argv.is_null() {
        for i in 0..argc.max(0) as usize {
            args.push(CStr::from_ptr(*argv.add(i)).to_string_lossy().into_owned());
        }
    }

    let mut files = Vec::new();
    if !unsaved.is_null() {
        for i in 0..unsaved_count as usize {
            let file = &*unsaved.add(i);
            let name = CStr::from_ptr(file.Filename).to_string_lossy().into_owned();
            let contents =
                std::slice::from_raw_parts(file.Contents as *const u8, file.Length as usize)
                    .to_vec();
            files.push((name, contents));
        }
    }

    with_stats(|stats| {
        stats.last_argc = Some(argc);
        stats.last_argv_null = argv.is_null();
        stats.last_args = args.clone();
        stats.last_filename = filename.clone();
        stats.last_unsaved = files.clone();
        stats.last_options = options;
    });

    if index.is_null() || out.is_null() || (argc > 0 && argv.is_null()) {
        return CXError_InvalidArguments;
    }

    let source = filename.or_else(|| args.iter().find(|a| !a.starts_with('-')).cloned());
    if let Some(source) = source {
        let in_memory = files.iter().any(|(name, _)| *name == source);
        if !in_memory && !Path::new(&source).exists() {
            return CXError_Failure;
        }
    }

    with_stats(|stats| stats.units_created += 1);
    *out = CXTranslationUnit::from_ptr(Box::into_raw(Box::new(0u8)) as *mut c_void);
    CXError_Success
}

unsafe extern "C" fn dispose_unit(unit: CXTranslationUnit) {
    if !unit.is_null() {
        drop(Box::from_raw(unit.as_ptr() as *mut u8));
    }
    with_stats(|stats| stats.units_disposed += 1);
}

unsafe extern "C" fn unit_cursor(_unit: CXTranslationUnit) -> CXCursor {
    cursor(0)
}

unsafe extern "C" fn unit_spelling(_unit: CXTranslationUnit) -> CXString {
    let name = STATE.with(|s| s.borrow().stats.last_filename.clone());
    make_string(Some(name.as_deref().unwrap_or("")))
}

type Visitor = unsafe extern "C" fn(CXCursor, CXCursor, CXClientData) -> CXChildVisitResult;

/// Pre-order walk below `id`. Returns true when the visitor asked to stop.
fn walk(id: usize, visitor: Visitor, data: CXClientData) -> bool {
    let children = node(id).children;
    for child in children {
        let result = unsafe { visitor(cursor(child), cursor(id), data) };
        match result {
            CXChildVisit_Break => return true,
            CXChildVisit_Recurse => {
                if walk(child, visitor, data) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

unsafe extern "C" fn visit_children(
    parent: CXCursor,
    visitor: CXCursorVisitor,
    data: CXClientData,
) -> c_uint {
    match visitor {
        Some(visitor) => walk(node_id(parent.data[0]), visitor, data) as c_uint,
        None => 0,
    }
}

unsafe extern "C" fn cursor_is_null(c: CXCursor) -> c_int {
    (c.kind == NULL_CURSOR) as c_int
}

unsafe extern "C" fn cursor_spelling(c: CXCursor) -> CXString {
    make_string(Some(&node(node_id(c.data[0])).name))
}

unsafe extern "C" fn cursor_display_name(c: CXCursor) -> CXString {
    let n = node(node_id(c.data[0]));
    if n.kind == FUNCTION_DECL {
        make_string(Some(&format!("{}()", n.name)))
    } else {
        make_string(Some(&n.name))
    }
}

unsafe extern "C" fn cursor_usr(c: CXCursor) -> CXString {
    let n = node(node_id(c.data[0]));
    if n.kind == TRANSLATION_UNIT {
        make_string(None)
    } else {
        make_string(Some(&format!("c:@{}", n.name)))
    }
}

unsafe extern "C" fn cursor_kind(c: CXCursor) -> CXCursorKind {
    c.kind
}

unsafe extern "C" fn cursor_kind_spelling(kind: CXCursorKind) -> CXString {
    let name = match kind {
        FUNCTION_DECL => "FunctionDecl",
        VAR_DECL => "VarDecl",
        PARM_DECL => "ParmDecl",
        INTEGER_LITERAL => "IntegerLiteral",
        COMPOUND_STMT => "CompoundStmt",
        TRANSLATION_UNIT => "TranslationUnit",
        _ => "Unknown",
    };
    make_string(Some(name))
}

unsafe extern "C" fn cursor_extent(c: CXCursor) -> CXSourceRange {
    let n = node(node_id(c.data[0]));
    CXSourceRange {
        ptr_data: [c.data[0], ptr::null()],
        begin_int_data: n.line,
        end_int_data: n.line + 1,
    }
}

unsafe extern "C" fn cursor_type(c: CXCursor) -> CXType {
    let kind = match c.kind {
        FUNCTION_DECL => TYPE_FUNCTION_PROTO,
        VAR_DECL | PARM_DECL => TYPE_INT,
        _ => TYPE_INVALID,
    };
    CXType {
        kind,
        data: [c.data[0] as *mut c_void, ptr::null_mut()],
    }
}

unsafe extern "C" fn cursor_linkage(c: CXCursor) -> c_int {
    if c.kind == TRANSLATION_UNIT {
        0
    } else {
        4
    }
}

unsafe extern "C" fn cursor_visibility(_c: CXCursor) -> c_int {
    3
}

unsafe extern "C" fn cursor_availability(_c: CXCursor) -> c_int {
    0
}

unsafe extern "C" fn cursor_language(_c: CXCursor) -> c_int {
    1
}

unsafe extern "C" fn cursor_tls_kind(c: CXCursor) -> c_int {
    (c.kind == VAR_DECL) as c_int
}

unsafe extern "C" fn is_declaration(k: CXCursorKind) -> c_uint {
    (1..=39).contains(&k) as c_uint
}

unsafe extern "C" fn is_reference(k: CXCursorKind) -> c_uint {
    (40..=51).contains(&k) as c_uint
}

unsafe extern "C" fn is_expression(k: CXCursorKind) -> c_uint {
    (100..=156).contains(&k) as c_uint
}

unsafe extern "C" fn is_statement(k: CXCursorKind) -> c_uint {
    (200..=280).contains(&k) as c_uint
}

unsafe extern "C" fn is_attribute(k: CXCursorKind) -> c_uint {
    (400..=441).contains(&k) as c_uint
}

unsafe extern "C" fn is_invalid(k: CXCursorKind) -> c_uint {
    (70..=73).contains(&k) as c_uint
}

unsafe extern "C" fn is_translation_unit(k: CXCursorKind) -> c_uint {
    (k == TRANSLATION_UNIT) as c_uint
}

unsafe extern "C" fn is_preprocessing(k: CXCursorKind) -> c_uint {
    (500..=503).contains(&k) as c_uint
}

unsafe extern "C" fn is_unexposed(k: CXCursorKind) -> c_uint {
    matches!(k, 1 | 100 | 200 | 400) as c_uint
}

unsafe extern "C" fn range_start(r: CXSourceRange) -> CXSourceLocation {
    CXSourceLocation {
        ptr_data: r.ptr_data,
        int_data: r.begin_int_data,
    }
}

unsafe extern "C" fn range_end(r: CXSourceRange) -> CXSourceLocation {
    CXSourceLocation {
        ptr_data: r.ptr_data,
        int_data: r.end_int_data,
    }
}

unsafe extern "C" fn location(
    loc: CXSourceLocation,
    file: *mut CXFile,
    line: *mut c_uint,
    column: *mut c_uint,
    offset: *mut c_uint,
) {
    let n = node(node_id(loc.ptr_data[0]));
    if !file.is_null() {
        *file = if n.has_file {
            CXFile::from_ptr(&FAKE_FILE as *const u8 as *mut c_void)
        } else {
            CXFile::null()
        };
    }
    if !line.is_null() {
        *line = loc.int_data;
    }
    if !column.is_null() {
        *column = n.column;
    }
    if !offset.is_null() {
        *offset = n.offset;
    }
}

unsafe extern "C" fn file_name(file: CXFile) -> CXString {
    if file.is_null() {
        make_string(None)
    } else {
        make_string(Some("fake.c"))
    }
}

unsafe extern "C" fn type_spelling(t: CXType) -> CXString {
    let name = match t.kind {
        TYPE_INT => "int",
        TYPE_FUNCTION_PROTO => "int (void)",
        _ => "",
    };
    make_string(Some(name))
}

unsafe extern "C" fn type_kind_spelling(kind: c_int) -> CXString {
    let name = match kind {
        TYPE_INVALID => "Invalid",
        TYPE_INT => "Int",
        TYPE_FUNCTION_PROTO => "FunctionProto",
        _ => "Unexposed",
    };
    make_string(Some(name))
}

/// Symbol table pointing at the fake implementations.
pub fn table() -> LibClang {
    LibClang {
        library: None,
        clang_getCString: get_cstring,
        clang_disposeString: dispose_string,
        clang_getClangVersion: clang_version,
        clang_createIndex: create_index,
        clang_disposeIndex: dispose_index,
        clang_parseTranslationUnit2: parse,
        clang_disposeTranslationUnit: dispose_unit,
        clang_getTranslationUnitCursor: unit_cursor,
        clang_getTranslationUnitSpelling: unit_spelling,
        clang_visitChildren: visit_children,
        clang_Cursor_isNull: cursor_is_null,
        clang_getCursorSpelling: cursor_spelling,
        clang_getCursorDisplayName: cursor_display_name,
        clang_getCursorUSR: cursor_usr,
        clang_getCursorKind: cursor_kind,
        clang_getCursorKindSpelling: cursor_kind_spelling,
        clang_getCursorExtent: cursor_extent,
        clang_getCursorType: cursor_type,
        clang_getCursorLinkage: cursor_linkage,
        clang_getCursorVisibility: cursor_visibility,
        clang_getCursorAvailability: cursor_availability,
        clang_getCursorLanguage: cursor_language,
        clang_getCursorTLSKind: cursor_tls_kind,
        clang_isDeclaration: is_declaration,
        clang_isReference: is_reference,
        clang_isExpression: is_expression,
        clang_isStatement: is_statement,
        clang_isAttribute: is_attribute,
        clang_isInvalid: is_invalid,
        clang_isTranslationUnit: is_translation_unit,
        clang_isPreprocessing: is_preprocessing,
        clang_isUnexposed: is_unexposed,
        clang_getRangeStart: range_start,
        clang_getRangeEnd: range_end,
        clang_getInstantiationLocation: location,
        clang_getSpellingLocation: location,
        clang_getFileName: file_name,
        clang_getTypeSpelling: type_spelling,
        clang_getTypeKindSpelling: type_kind_spelling,
    }
}
