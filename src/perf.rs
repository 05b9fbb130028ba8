// ==========================================
// 航空订座系统 - 写语句审计与慢查询日志
// ==========================================
// 约束: 每个对外操作成功时至多提交一条写语句
// PerfGuard 按操作统计读/写语句数，写语句超出上限时输出 warn
// （订座编号冲突重试时失败的 INSERT 也计入）
//
// 开关:
// - AIR_BOOKING_PERF_SQL=1 强制开启（Debug 默认开启，Release 默认关闭）
// - AIR_BOOKING_SLOW_SQL_MS=50 慢 SQL 阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 单个对外操作允许提交的写语句数
pub const MAX_WRITES_PER_OPERATION: u64 = 1;

static ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static ACTIVE_OPS: Cell<u32> = Cell::new(0);
    static CURRENT_OP: Cell<&'static str> = Cell::new("");
    static COUNTERS: Cell<SqlCounters> = Cell::new(SqlCounters::default());
}

/// 语句计数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SqlCounters {
    pub reads: u64,
    pub writes: u64,
    pub slow: u64,
}

impl SqlCounters {
    fn since(self, earlier: SqlCounters) -> SqlCounters {
        SqlCounters {
            reads: self.reads.saturating_sub(earlier.reads),
            writes: self.writes.saturating_sub(earlier.writes),
            slow: self.slow.saturating_sub(earlier.slow),
        }
    }
}

/// 语句类别（按首个关键字判断）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
    Other,
}

pub fn classify_statement(sql: &str) -> StatementKind {
    let keyword = sql
        .trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or("");
    match keyword.to_ascii_uppercase().as_str() {
        "SELECT" | "WITH" => StatementKind::Read,
        "INSERT" | "UPDATE" | "DELETE" | "REPLACE" => StatementKind::Write,
        _ => StatementKind::Other,
    }
}

/// trace/profile 回调的开关与阈值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfSettings {
    pub enabled: bool,
    /// 0 表示不输出慢 SQL
    pub slow_threshold_ms: u64,
}

impl PerfSettings {
    pub fn from_env() -> Self {
        let enabled = std::env::var("AIR_BOOKING_PERF_SQL")
            .ok()
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(cfg!(debug_assertions));

        let slow_threshold_ms = std::env::var("AIR_BOOKING_SLOW_SQL_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });

        Self {
            enabled,
            slow_threshold_ms,
        }
    }
}

fn one_line(sql: &str, max_chars: usize) -> String {
    let flat: String = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let truncated: String = flat.chars().take(max_chars).collect();
    format!("{}…", truncated)
}

fn op_active() -> bool {
    ACTIVE_OPS.with(|d| d.get() > 0)
}

fn snapshot() -> SqlCounters {
    COUNTERS.with(|c| c.get())
}

fn bump(update: impl FnOnce(&mut SqlCounters)) {
    COUNTERS.with(|c| {
        let mut counters = c.get();
        update(&mut counters);
        c.set(counters);
    });
}

/// 按环境变量在连接上安装 trace/profile 回调
pub fn install_sqlite_tracing(conn: &mut Connection) {
    install_with(conn, PerfSettings::from_env());
}

/// 按指定设置安装回调
pub fn install_with(conn: &mut Connection, settings: PerfSettings) {
    ENABLED.store(settings.enabled, Ordering::Relaxed);

    if !settings.enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    SLOW_THRESHOLD_MS.store(settings.slow_threshold_ms, Ordering::Relaxed);
    conn.trace(Some(on_statement));
    conn.profile(Some(on_profile));
}

fn on_statement(sql: &str) {
    if !ENABLED.load(Ordering::Relaxed) || !op_active() {
        return;
    }
    match classify_statement(sql) {
        StatementKind::Read => bump(|c| c.reads = c.reads.saturating_add(1)),
        StatementKind::Write => bump(|c| c.writes = c.writes.saturating_add(1)),
        StatementKind::Other => {}
    }
}

fn on_profile(sql: &str, duration: Duration) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let elapsed_ms = duration.as_millis() as u64;
    let threshold = SLOW_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold == 0 || elapsed_ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        op = CURRENT_OP.with(|op| op.get()),
        duration_ms = elapsed_ms,
        sql = %one_line(sql, 400),
        "slow sql"
    );
    if op_active() {
        bump(|c| c.slow = c.slow.saturating_add(1));
    }
}

/// 单个对外操作的耗时与语句审计
///
/// ```ignore
/// let _perf = air_booking::perf::PerfGuard::new("book_flight");
/// ```
pub struct PerfGuard {
    op: &'static str,
    outer_op: &'static str,
    started: Instant,
    before: SqlCounters,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        ACTIVE_OPS.with(|d| d.set(d.get().saturating_add(1)));
        let outer_op = CURRENT_OP.with(|current| current.replace(op));
        Self {
            op,
            outer_op,
            started: Instant::now(),
            before: snapshot(),
        }
    }

    /// 自创建以来本线程执行的语句数
    pub fn counters(&self) -> SqlCounters {
        snapshot().since(self.before)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let counters = self.counters();

        tracing::debug!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            reads = counters.reads,
            writes = counters.writes,
            slow_sql_count = counters.slow,
            "done"
        );
        if counters.writes > MAX_WRITES_PER_OPERATION {
            tracing::warn!(
                target: "perf",
                op = self.op,
                writes = counters.writes,
                "单次操作提交了多条写语句"
            );
        }

        CURRENT_OP.with(|current| current.set(self.outer_op));
        ACTIVE_OPS.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
